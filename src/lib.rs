#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-formfield/")]

//! # bubbletea-formfield
//!
//! A material-style form text field for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate provides a single component, [`TextField`], that wraps an
//! editable text surface in decorated chrome (floating hint label, icons,
//! suffix text, error row, character counter, box stroke) and layers a
//! form-input contract on top of it:
//!
//! - **State synchronization**: the canonical value and the displayed text
//!   stay equal after every programmatic or keyboard mutation, without the
//!   two echoing into each other.
//! - **Input filtering**: edits pass through an ordered pipeline (custom
//!   filters, allow-list, length cap) before they are committed.
//! - **Validation**: named checks run in aggregate and drive an error row
//!   under the input.
//! - **Persistence**: [`capture()`](textfield::Model::capture) and
//!   [`restore()`](textfield::Model::restore) carry the full field state,
//!   including collaborator sub-states, across a host lifecycle boundary as
//!   a versioned byte snapshot.
//!
//! The component follows the Elm Architecture pattern with `update()` and
//! `view()` methods, so it drops into a bubbletea-rs model like any other
//! widget.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_formfield::prelude::*;
//!
//! let mut field = textfield_new();
//! field.focus();
//! field.set_hint_text("Name");
//! field.set_value("Ada");
//! assert_eq!(field.value(), "Ada");
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_formfield::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     amount: TextField,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut amount = TextField::with_options(Options {
//!             hint_text: "Amount".to_string(),
//!             suffix_text: "EUR".to_string(),
//!             allowed_characters: Some("0123456789.".to_string()),
//!             max_characters: Some(10),
//!             validation_enabled: true,
//!             ..Options::default()
//!         });
//!         amount.focus();
//!         (Self { amount }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.amount.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.amount.view()
//!     }
//! }
//! ```

pub mod textfield;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Provides a standardized interface for moving keyboard focus between
/// components: `focus()` makes a component the input target (and may return
/// a command for initialization work), `blur()` releases it, and `focused()`
/// reports the current state.
///
/// # Examples
///
/// ```rust
/// use bubbletea_formfield::prelude::*;
///
/// let mut field = textfield_new();
/// assert!(!field.focused());
///
/// field.focus();
/// assert!(field.focused());
///
/// field.blur();
/// assert!(!field.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// Returns an optional command to be executed by the bubbletea runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use textfield::{
    new as textfield_new, ChangedCallback, ConfigError, FilterFn, Model as TextField, Options,
    Snapshot, SnapshotError, ValidationCheck, Variant,
};

/// Prelude module for convenient imports.
///
/// Re-exports the component type, its configuration and callback types, and
/// the [`Component`] trait with a single `use` statement:
///
/// ```rust
/// use bubbletea_formfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::textfield::{
        new as textfield_new, ChangedCallback, ConfigError, FilterFn, Model as TextField, Options,
        Snapshot, SnapshotError, ValidationCheck, Variant,
    };
    pub use crate::Component;
}
