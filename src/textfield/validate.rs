//! Validation engine.

use super::model::Model;
use super::types::ValidationCheck;
use tracing::debug;

impl Model {
    /// Registers a validation check.
    pub fn add_validation_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Registers a validation check, removing any existing check with the
    /// same name first.
    pub fn add_or_replace_validation_check(&mut self, check: ValidationCheck) {
        self.checks.retain(|c| c.name != check.name);
        self.checks.push(check);
    }

    /// Removes the validation check with the given name, if present.
    pub fn remove_validation_check(&mut self, name: &str) {
        self.checks.retain(|c| c.name != name);
    }

    /// Reports whether `validate()` runs the registered checks.
    pub fn is_validation_enabled(&self) -> bool {
        self.validation_enabled
    }

    /// Enables or disables validation and immediately re-validates, so
    /// disabling clears any visible error.
    pub fn set_validation_enabled(&mut self, enabled: bool) {
        self.validation_enabled = enabled;
        self.validate();
    }

    /// Reports whether the error row is currently shown. Settable only
    /// through `validate()`.
    pub fn is_error_visible(&self) -> bool {
        self.error_visible
    }

    /// Runs every registered check against the current value.
    ///
    /// With validation disabled or the field disabled the result is always
    /// valid, any visible error is cleared, and no check runs. Otherwise all
    /// checks run (a failing check does not short-circuit the rest) and
    /// the result is their conjunction. Failure shows the error row with
    /// the stored message (the row is a display toggle independent of the
    /// message, which may be empty); success hides the row and clears the
    /// message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_formfield::textfield::{Model, ValidationCheck};
    ///
    /// let mut field = Model::new();
    /// field.set_validation_enabled(true);
    /// field.add_validation_check(ValidationCheck::new("min-3", |s| s.len() >= 3));
    ///
    /// field.set_value("ab");
    /// assert!(!field.validate());
    /// assert!(field.is_error_visible());
    ///
    /// field.set_value("abc");
    /// assert!(field.validate());
    /// assert!(!field.is_error_visible());
    /// ```
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        if self.validation_enabled && self.enabled {
            for check in &self.checks {
                valid &= (check.predicate)(&self.value);
            }
        }
        if !valid {
            debug!(checks = self.checks.len(), "field validation failed");
            self.error_visible = true;
            self.chrome.error_row_visible = true;
        } else {
            self.error_visible = false;
            self.chrome.error_row_visible = false;
            self.set_error("");
        }
        valid
    }
}
