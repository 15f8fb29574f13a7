//! Material-style form text field component for Bubble Tea applications.
//!
//! A single field composes a decorated chrome (hint label, icons, error row,
//! counter, box stroke) around an editable text surface, and layers a
//! synchronization, validation and persistence contract on top:
//!
//! - the canonical value and the displayed text stay equal after every
//!   mutation, with no echo between the two;
//! - edits pass through an ordered filter pipeline (allow-list, then length
//!   cap) before they are committed;
//! - `validate()` evaluates every registered check and drives the error row;
//! - `capture()`/`restore()` persist the full field state, including the
//!   collaborator sub-states, across a host lifecycle boundary.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_formfield::textfield::{Model, Options, ValidationCheck};
//!
//! let mut field = Model::with_options(Options {
//!     hint_text: "Quantity".to_string(),
//!     suffix_text: "kg".to_string(),
//!     allowed_characters: Some("0123456789".to_string()),
//!     max_characters: Some(4),
//!     validation_enabled: true,
//!     ..Options::default()
//! });
//! field.add_validation_check(ValidationCheck::new("not-empty", |s| !s.is_empty()));
//!
//! field.set_value("12a5");
//! assert_eq!(field.value(), "125"); // 'a' filtered out
//! assert!(field.validate());
//! ```
//!
//! # Persistence
//!
//! ```rust
//! use bubbletea_formfield::textfield::{Model, Snapshot};
//!
//! let mut field = Model::new();
//! field.set_value("draft");
//! let bytes = field.capture().encode();
//!
//! // ...process death, rotation, reconstruction...
//! let mut restored = Model::new();
//! restored.restore(Snapshot::decode(&bytes).unwrap()).unwrap();
//! assert_eq!(restored.value(), "draft");
//! ```

pub mod chrome;
pub mod filters;
pub mod keymap;
pub mod model;
pub mod snapshot;
pub mod surface;
pub mod sync;
pub mod tasks;
pub mod types;
pub mod validate;
pub mod view;
pub mod watcher;

#[cfg(test)]
mod tests;

pub use filters::FilterFn;
pub use model::{new, Model, Options};
pub use snapshot::{Snapshot, SnapshotError, FORMAT_VERSION};
pub use surface::{EditSurface, SurfaceState};
pub use types::{
    BindingListener, ChangedCallback, ConfigError, FocusChangedCallback, ValidationCheck, Variant,
};
pub use watcher::{EditGuard, EditPass, GuardedWatcher, Watcher};
