//! Error types for the booking and payment flows.

use thiserror::Error;
use wheelbase_platform::PlatformError;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Error taxonomy for the booking and payment flows.
///
/// Local draft validation never becomes an error; it lands in
/// [`BookingState::draft_errors`](crate::state::BookingState) as field
/// errors. This type covers what can go wrong once a flow talks to the
/// server or the payment gateway.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookingError {
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
    /// (for example a create-booking envelope without a `data` body).
    #[error("Response from {0} carried no payload")]
    MissingPayload(&'static str),

    /// The server answered the verification call but did not mark the
    /// payment successful.
    #[error("Payment verification was rejected by the server")]
    VerificationRejected,

    // ═══════════════════════════════════════════════════════════
    // Gateway Errors
    // ═══════════════════════════════════════════════════════════

    /// The payment widget could not be presented (script failed to load,
    /// gateway unreachable).
    #[error("Payment widget failed: {0}")]
    Widget(String),
}

impl BookingError {
    /// Returns `true` if the adapter has already handled this failure
    /// globally (credential purge plus forced redirect to sign-in), so the
    /// flow should skip its own error notification and navigation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_booking::BookingError;
    /// # use wheelbase_platform::PlatformError;
    /// let err = BookingError::from(PlatformError::AuthorizationDenied);
    /// assert!(err.is_authorization_denied());
    /// assert!(!BookingError::VerificationRejected.is_authorization_denied());
    /// ```
    #[must_use]
    pub const fn is_authorization_denied(&self) -> bool {
        matches!(self, Self::Platform(PlatformError::AuthorizationDenied))
    }

    /// The message to surface to the user: the server's own message when
    /// it sent one, the widget's reason when the gateway never opened,
    /// otherwise `fallback`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wheelbase_booking::BookingError;
    /// # use wheelbase_platform::PlatformError;
    /// let err = BookingError::from(PlatformError::Api {
    ///     status: 409,
    ///     message: "Car is no longer available".to_string(),
    /// });
    /// assert_eq!(err.user_message("Booking failed"), "Car is no longer available");
    ///
    /// let err = BookingError::from(PlatformError::Transport("timeout".to_string()));
    /// assert_eq!(err.user_message("Booking failed"), "Booking failed");
    ///
    /// let err = BookingError::Widget("Razorpay SDK failed to load.".to_string());
    /// assert_eq!(err.user_message("Failed to start payment"), "Razorpay SDK failed to load.");
    /// ```
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Platform(PlatformError::Api { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            Self::Widget(reason) => reason.clone(),
            _ => fallback.to_string(),
        }
    }
}
