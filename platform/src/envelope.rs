//! The server's response envelope.

use serde::Deserialize;

use crate::error::{PlatformError, Result};

/// The body shape most endpoints answer with: `{ status?, message?, data? }`.
///
/// Deserialization is lenient; every field is optional because the server
/// omits them inconsistently across endpoints. Callers that need the
/// outcome marker (payment verification) consult [`Envelope::is_success`];
/// everyone else goes straight for the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Outcome marker, `"success"` on the happy path.
    pub status: Option<String>,
    /// Human-readable outcome description.
    pub message: Option<String>,
    /// The payload proper.
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// `true` when the server marked the operation successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Extract the payload.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidResponse`] if the envelope carries
    /// no `data`; the error message is the server's, when one was sent.
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or_else(|| {
            PlatformError::InvalidResponse(
                self.message
                    .unwrap_or_else(|| "response envelope carried no data".to_string()),
            )
        })
    }

    /// The server message, or `fallback` when none was sent.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}
