//! Error types for host-platform ports and the HTTP adapter.

use thiserror::Error;

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error taxonomy for everything that can fail between the client core and
/// the outside world: the credential jar, the transport, and the rental API
/// itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlatformError {
    // ═══════════════════════════════════════════════════════════
    // Authorization
    // ═══════════════════════════════════════════════════════════

    /// The server rejected the request as unauthorized.
    ///
    /// By the time this error reaches a caller the adapter has already
    /// purged persisted credentials and forced a redirect to the sign-in
    /// route; local handlers should skip duplicate notifications.
    #[error("Authorization denied")]
    AuthorizationDenied,

    // ═══════════════════════════════════════════════════════════
    // Server Errors
    // ═══════════════════════════════════════════════════════════

    /// The server answered with a non-success status other than 401.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided message, or the raw body when none was sent.
        message: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Transport Errors
    // ═══════════════════════════════════════════════════════════

    /// The request never produced a usable response (connect failure,
    /// timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response arrived but its body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════
    // Host Platform Errors
    // ═══════════════════════════════════════════════════════════

    /// The credential jar could not be read or written.
    #[error("Credential store error: {0}")]
    CredentialStore(String),

    /// Internal error (client construction, poisoned mock state).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Returns `true` if the adapter has already handled this error
    /// globally (credential purge plus forced redirect), so call sites
    /// should stay quiet.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_platform::PlatformError;
    /// assert!(PlatformError::AuthorizationDenied.is_authorization_denied());
    /// assert!(!PlatformError::Transport("timeout".to_string()).is_authorization_denied());
    /// ```
    #[must_use]
    pub const fn is_authorization_denied(&self) -> bool {
        matches!(self, Self::AuthorizationDenied)
    }

    /// Returns `true` if the failure happened below the API: the network
    /// itself or an undecodable body.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_platform::PlatformError;
    /// assert!(PlatformError::Transport("connection refused".to_string()).is_transport());
    /// assert!(!PlatformError::AuthorizationDenied.is_transport());
    /// ```
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidResponse(_))
    }

    /// HTTP status carried by this error, when one exists.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_platform::PlatformError;
    /// let err = PlatformError::Api { status: 409, message: "duplicate booking".to_string() };
    /// assert_eq!(err.status(), Some(409));
    /// assert_eq!(PlatformError::AuthorizationDenied.status(), Some(401));
    /// ```
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::AuthorizationDenied => Some(401),
            _ => None,
        }
    }
}
