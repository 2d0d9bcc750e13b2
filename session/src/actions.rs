//! Session actions.
//!
//! The closed set of inputs to the session reducers. Commands express user
//! or shell intent; events are produced by effects and feed results back
//! into the store. No other code path mutates [`SessionState`].
//!
//! [`SessionState`]: crate::state::SessionState

use serde::{Deserialize, Serialize};
use wheelbase_platform::UserProfile;

/// Locally captured sign-up form.
///
/// `confirm_password` and `agree_terms` never leave the client; the wire
/// body is built from the remaining fields once validation passes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignUpForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Sign-in email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation, compared locally.
    pub confirm_password: String,
    /// Whether the terms checkbox was ticked.
    pub agree_terms: bool,
}

/// Identity payload applied when bootstrap restores a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoredAuth {
    /// User snapshot from the jar or the refresh exchange.
    pub user: UserProfile,
    /// Access token to authenticate subsequent calls with.
    pub access_token: String,
    /// Refresh token, when one survived.
    pub refresh_token: Option<String>,
}

/// All inputs to the session store.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    // ═══════════════════════════════════════════════════════════════
    // Primitive mutations
    // ═══════════════════════════════════════════════════════════════
    /// Set the identity fields and force `is_authenticated = true`.
    ///
    /// Performs no validation of the payload; a missing `user` still
    /// flips the flag, which is exactly why the route guards re-check
    /// effective authentication themselves.
    SetAuth {
        /// User snapshot, if the caller has one.
        user: Option<UserProfile>,
        /// Bearer token, if the caller has one.
        access_token: Option<String>,
        /// Refresh token, if the caller has one.
        refresh_token: Option<String>,
    },

    /// Record bootstrap completion. `true` latches; a later `false` is
    /// ignored with a warning so initialization is monotonic.
    SetAuthInitialized(bool),

    /// Clear identity fields and force `is_authenticated = false`.
    /// Idempotent; never touches `is_initialized`.
    Logout,

    // ═══════════════════════════════════════════════════════════════
    // Bootstrap
    // ═══════════════════════════════════════════════════════════════
    /// Reconcile persisted credentials into live state. Runs once per
    /// process; repeat requests are ignored.
    BootstrapRequested,

    /// Terminal bootstrap event: applies the restored identity (if any)
    /// and marks the session initialized. Every bootstrap branch ends
    /// here, including jar read failures and refresh errors.
    BootstrapCompleted {
        /// Identity restored from the jar or the refresh exchange.
        auth: Option<RestoredAuth>,
    },

    // ═══════════════════════════════════════════════════════════════
    // Sign-in
    // ═══════════════════════════════════════════════════════════════
    /// Submit the sign-in form.
    SignInSubmitted {
        /// Email as typed.
        email: String,
        /// Password as typed.
        password: String,
        /// Whether credentials should persist past the host session.
        remember_me: bool,
    },

    /// Sign-in exchange succeeded; credentials are already persisted.
    SignInSucceeded {
        /// Authenticated user.
        user: UserProfile,
        /// Fresh access token.
        access_token: String,
        /// Fresh refresh token.
        refresh_token: String,
    },

    /// Sign-in exchange failed.
    SignInFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },

    // ═══════════════════════════════════════════════════════════════
    // Sign-up and email verification
    // ═══════════════════════════════════════════════════════════════
    /// Submit the sign-up form.
    SignUpSubmitted {
        /// The captured form.
        form: SignUpForm,
    },

    /// Account created; the server issued a verification token.
    SignUpSucceeded {
        /// Token scoping the emailed verification code.
        verification_token: String,
        /// Server acknowledgement message, when one was sent.
        message: Option<String>,
    },

    /// Account creation failed.
    SignUpFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },

    /// Submit the emailed 6-digit verification code.
    VerificationCodeSubmitted {
        /// Verification token from the sign-up response.
        token: String,
        /// Code as typed.
        code: String,
    },

    /// Email verified.
    VerificationSucceeded {
        /// Server acknowledgement message, when one was sent.
        message: Option<String>,
    },

    /// Verification rejected or failed.
    VerificationFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },

    /// Ask the server to reissue the verification code.
    ResendCodeRequested {
        /// Verification token from the sign-up response.
        token: String,
    },

    /// Code reissued.
    ResendCodeSucceeded {
        /// Server acknowledgement message, when one was sent.
        message: Option<String>,
    },

    /// Reissue failed.
    ResendCodeFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },

    // ═══════════════════════════════════════════════════════════════
    // Password recovery
    // ═══════════════════════════════════════════════════════════════
    /// Request a password reset email.
    PasswordResetRequested {
        /// Address to send the reset link to.
        email: String,
    },

    /// Reset email accepted by the server.
    PasswordResetEmailSent,

    /// Reset email request failed.
    PasswordResetRequestFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },

    /// Submit the new password for a reset token.
    PasswordResetSubmitted {
        /// Reset token from the emailed link.
        token: String,
        /// New password.
        new_password: String,
        /// Confirmation, compared locally.
        confirm_password: String,
    },

    /// Password reset completed.
    PasswordResetSucceeded,

    /// Password reset failed.
    PasswordResetFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },

    // ═══════════════════════════════════════════════════════════════
    // Sign-out
    // ═══════════════════════════════════════════════════════════════
    /// Invalidate the server session and clear local credentials.
    SignOutRequested,

    /// Sign-out completed; the jar is already purged.
    SignOutSucceeded,

    /// Sign-out failed; the local session is left intact.
    SignOutFailed {
        /// Message to surface.
        message: String,
        /// Whether the adapter already handled this failure globally.
        handled_globally: bool,
    },
}
