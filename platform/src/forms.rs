//! Form-validation vocabulary shared by the feature crates.
//!
//! Session and booking flows both validate locally before any network
//! call and surface failures per input field. The types live here so the
//! feature crates agree on one shape without depending on each other.

use serde::{Deserialize, Serialize};

/// A single field-level failure surfaced by a flow.
///
/// `field` names the input the message belongs to (`"email"`,
/// `"contact"`, ...); whole-form failures such as server rejections use
/// [`FieldError::form`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending input field.
    pub field: String,
    /// Human-readable message for that field.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a whole-form error (server rejection, transport failure).
    pub fn form(message: impl Into<String>) -> Self {
        Self::new("form", message)
    }
}

/// Collection of field errors attached to a failed flow.
pub type FieldErrors = Vec<FieldError>;

/// The message recorded for `field`, if `errors` carries one.
#[must_use]
pub fn field_message<'a>(errors: &'a FieldErrors, field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}
