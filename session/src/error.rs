//! Error types for session and authentication flows.

use thiserror::Error;
use wheelbase_platform::PlatformError;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Error taxonomy for the authentication flows.
///
/// Local validation failures never become errors; they land in the per-flow
/// [`FlowStatus`](crate::state::FlowStatus) as field errors. This type covers
/// what can go wrong once a flow actually talks to the outside world.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    // ═══════════════════════════════════════════════════════════
    // Adapter Errors
    // ═══════════════════════════════════════════════════════════

    /// Failure raised by the HTTP adapter or a host-platform port.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    // ═══════════════════════════════════════════════════════════
    // Contract Errors
    // ═══════════════════════════════════════════════════════════

    /// The response decoded but did not carry the payload the flow needs
    /// (for example a sign-in envelope without a `data` body).
    #[error("Response from {0} carried no payload")]
    MissingPayload(&'static str),
}

impl SessionError {
    /// Returns `true` if the adapter has already handled this failure
    /// globally (credential purge plus forced redirect to sign-in), so the
    /// flow should skip its own error notification.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_session::SessionError;
    /// # use wheelbase_platform::PlatformError;
    /// let err = SessionError::from(PlatformError::AuthorizationDenied);
    /// assert!(err.is_authorization_denied());
    /// assert!(!SessionError::MissingPayload("/auth/signin").is_authorization_denied());
    /// ```
    #[must_use]
    pub const fn is_authorization_denied(&self) -> bool {
        matches!(self, Self::Platform(PlatformError::AuthorizationDenied))
    }

    /// The message to surface to the user: the server's own message when
    /// it sent one, otherwise `fallback`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_session::SessionError;
    /// # use wheelbase_platform::PlatformError;
    /// let err = SessionError::from(PlatformError::Api {
    ///     status: 401,
    ///     message: "Invalid credentials".to_string(),
    /// });
    /// assert_eq!(err.user_message("Signin failed"), "Invalid credentials");
    ///
    /// let err = SessionError::from(PlatformError::Transport("timeout".to_string()));
    /// assert_eq!(err.user_message("Signin failed"), "Signin failed");
    /// ```
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Platform(PlatformError::Api { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}
