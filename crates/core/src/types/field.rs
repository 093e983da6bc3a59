//! Required form field type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Required`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The input is empty or only whitespace.
    #[error("field cannot be empty")]
    Empty,
}

/// A submitted form value that is present and non-blank.
///
/// Surrounding whitespace is trimmed on parse; nothing else is checked.
/// Values may still contain the record separators (`:` and `|`) or
/// interior whitespace.
///
/// ## Examples
///
/// ```
/// use bookstall_core::Required;
///
/// assert_eq!(Required::parse("  alice ").unwrap().as_str(), "alice");
/// assert!(Required::parse("").is_err());
/// assert!(Required::parse(" \t ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Required(String);

impl Required {
    /// Parse a `Required` from a raw form value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Empty`] if nothing is left after trimming.
    pub fn parse(s: &str) -> Result<Self, FieldError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse an optional raw value, treating a missing field as empty.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Empty`] if the value is missing or blank.
    pub fn parse_opt(s: Option<&str>) -> Result<Self, FieldError> {
        Self::parse(s.unwrap_or_default())
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Required` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Required {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Required {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
