//! Re-entrancy guard for edit notifications.
//!
//! Mutating the observed text from inside a text-change callback would
//! re-trigger the callback and loop forever. The guard keeps a single
//! in-progress flag: while an edit pass is active, further entry attempts
//! are refused and the caller must no-op. The flag is cleared by a drop
//! guard, so it survives a panicking callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable handle to a single "edit in progress" flag.
///
/// Clones share the same flag, so a callback holding a clone observes the
/// pass opened by its caller.
///
/// # Examples
///
/// ```rust
/// use bubbletea_formfield::textfield::EditGuard;
///
/// let guard = EditGuard::new();
/// {
///     let _pass = guard.try_enter().expect("first entry succeeds");
///     assert!(guard.try_enter().is_none()); // re-entrant attempt refused
/// }
/// assert!(guard.try_enter().is_some()); // pass dropped, flag cleared
/// ```
#[derive(Debug, Clone, Default)]
pub struct EditGuard {
    editing: Arc<AtomicBool>,
}

impl EditGuard {
    /// Creates a guard with the flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to open an edit pass.
    ///
    /// Returns `None` when a pass is already active; the caller must then
    /// return without running its wrapped logic. The returned [`EditPass`]
    /// clears the flag when dropped, including during unwinding.
    pub fn try_enter(&self) -> Option<EditPass> {
        if self.editing.swap(true, Ordering::Relaxed) {
            return None;
        }
        Some(EditPass {
            editing: Arc::clone(&self.editing),
        })
    }

    /// Reports whether an edit pass is currently active.
    pub fn is_editing(&self) -> bool {
        self.editing.load(Ordering::Relaxed)
    }
}

/// An open edit pass. Dropping it clears the in-progress flag.
#[derive(Debug)]
pub struct EditPass {
    editing: Arc<AtomicBool>,
}

impl Drop for EditPass {
    fn drop(&mut self) {
        self.editing.store(false, Ordering::Relaxed);
    }
}

/// The three edit-lifecycle hooks observed around a text change.
pub trait Watcher {
    /// Called before the change is applied, with the current text.
    fn before_change(&mut self, _text: &str) {}
    /// Called while the change is being applied.
    fn on_change(&mut self, _text: &str) {}
    /// Called after the change has been committed.
    fn after_change(&mut self, _text: &str) {}
}

impl<W: Watcher + ?Sized> Watcher for Box<W> {
    fn before_change(&mut self, text: &str) {
        (**self).before_change(text);
    }

    fn on_change(&mut self, text: &str) {
        (**self).on_change(text);
    }

    fn after_change(&mut self, text: &str) {
        (**self).after_change(text);
    }
}

/// Wraps a [`Watcher`] so that a change performed inside any hook does not
/// re-invoke the hooks.
pub struct GuardedWatcher<W> {
    inner: W,
    guard: EditGuard,
}

impl<W: Watcher> GuardedWatcher<W> {
    /// Wraps `inner` with a fresh guard.
    pub fn new(inner: W) -> Self {
        Self::with_guard(inner, EditGuard::new())
    }

    /// Wraps `inner` with an existing guard, sharing its flag.
    pub fn with_guard(inner: W, guard: EditGuard) -> Self {
        Self { inner, guard }
    }

    /// Invokes the before-change hook unless an edit pass is already active.
    pub fn before_changed(&mut self, text: &str) {
        let Some(_pass) = self.guard.try_enter() else {
            return;
        };
        self.inner.before_change(text);
    }

    /// Invokes the on-change hook unless an edit pass is already active.
    pub fn text_changed(&mut self, text: &str) {
        let Some(_pass) = self.guard.try_enter() else {
            return;
        };
        self.inner.on_change(text);
    }

    /// Invokes the after-change hook unless an edit pass is already active.
    pub fn after_changed(&mut self, text: &str) {
        let Some(_pass) = self.guard.try_enter() else {
            return;
        };
        self.inner.after_change(text);
    }

    /// Reports whether a hook is currently executing.
    pub fn is_editing(&self) -> bool {
        self.guard.is_editing()
    }

    /// Returns a handle to the shared guard.
    pub fn guard(&self) -> EditGuard {
        self.guard.clone()
    }

    /// Returns the wrapped watcher.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
