//! Core types for the textfield component.

use thiserror::Error;

/// Visual variant of the decorated field.
///
/// `Boxed` draws a filled background behind the input row, `Outlined` draws a
/// border around it. The numeric codes match the attribute values accepted by
/// configuration sources (`1` = boxed, `2` = outlined).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Filled background behind the input row. This is the default.
    #[default]
    Boxed,
    /// Border drawn around the input row.
    Outlined,
}

impl Variant {
    /// Resolves a raw configuration code into a variant.
    ///
    /// Unknown codes are a configuration error surfaced at construction time
    /// rather than silently mapped to a default.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_formfield::textfield::Variant;
    ///
    /// assert_eq!(Variant::from_code(1).unwrap(), Variant::Boxed);
    /// assert_eq!(Variant::from_code(2).unwrap(), Variant::Outlined);
    /// assert!(Variant::from_code(3).is_err());
    /// ```
    pub fn from_code(code: i32) -> Result<Self, ConfigError> {
        match code {
            1 => Ok(Variant::Boxed),
            2 => Ok(Variant::Outlined),
            other => Err(ConfigError::UnknownVariant(other)),
        }
    }

    /// Returns the configuration code for this variant.
    pub fn code(&self) -> i32 {
        match self {
            Variant::Boxed => 1,
            Variant::Outlined => 2,
        }
    }
}

/// Errors produced while resolving construction-time configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The variant code did not name a known visual variant.
    #[error("unknown field variant code: {0}")]
    UnknownVariant(i32),
}

/// A named validation predicate.
///
/// The name is the identity used by add-or-replace and remove registration;
/// the predicate receives the current value and returns whether it passes.
pub struct ValidationCheck {
    pub(super) name: String,
    pub(super) predicate: Box<dyn Fn(&str) -> bool + Send>,
}

impl ValidationCheck {
    /// Creates a named validation check.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_formfield::textfield::ValidationCheck;
    ///
    /// let not_empty = ValidationCheck::new("not-empty", |s| !s.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, predicate: impl Fn(&str) -> bool + Send + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Returns the identity name of this check.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named value-change callback, invoked with `(new, old)`.
pub struct ChangedCallback {
    pub(super) name: String,
    pub(super) callback: Box<dyn FnMut(&str, &str) + Send>,
}

impl ChangedCallback {
    /// Creates a named change callback.
    pub fn new(name: impl Into<String>, callback: impl FnMut(&str, &str) + Send + 'static) -> Self {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }

    /// Returns the identity name of this callback.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Listener notified once per externally observable value change, used as the
/// change-notification half of the two-way binding channel.
pub type BindingListener = Box<dyn FnMut(&str) + Send>;

/// Callback invoked (on the next update pass) when the field gains or loses
/// focus.
pub type FocusChangedCallback = Box<dyn FnMut(bool) + Send>;
