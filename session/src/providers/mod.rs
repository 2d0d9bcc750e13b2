//! Authentication providers.
//!
//! [`AuthApi`] is the session store's only network dependency. Reducers
//! depend on the trait; [`HttpAuthApi`](http::HttpAuthApi) is the
//! production implementation over the platform adapter, and
//! [`MockAuthApi`](crate::mocks::MockAuthApi) drives tests at memory
//! speed.

pub mod http;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use wheelbase_platform::UserProfile;

/// Payload of a successful credential or refresh exchange.
///
/// Field names follow the server's camelCase contract; this is the `data`
/// body of `/auth/signin` and `/auth/refresh-token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: UserProfile,
}

/// Wire body for account creation.
///
/// Confirmation and terms consent stay local; only these four fields
/// leave the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Sign-in email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
}

/// Outcome of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpReceipt {
    /// Token scoping the emailed verification code.
    pub verification_token: String,
    /// Server acknowledgement message, when one was sent.
    pub message: Option<String>,
}

/// The authentication endpoints of the rental API.
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair and user record.
    ///
    /// POST `/auth/signin`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`](crate::SessionError::Platform)
    /// for rejected credentials and transport failures,
    /// [`SessionError::MissingPayload`](crate::SessionError::MissingPayload)
    /// if the envelope carries no grant.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<AuthGrant>> + Send;

    /// Create a pending account.
    ///
    /// POST `/auth/signup`; the response carries the verification token.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::sign_in`].
    fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> impl std::future::Future<Output = Result<SignUpReceipt>> + Send;

    /// Confirm an email address with its 6-digit code.
    ///
    /// POST `/auth/verify-code/:token`. Resolves to the server message,
    /// when one was sent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`](crate::SessionError::Platform)
    /// for rejected codes and transport failures.
    fn verify_code(
        &self,
        token: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Reissue the verification code.
    ///
    /// POST `/auth/resend-code/:token`. Resolves to the server message,
    /// when one was sent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`](crate::SessionError::Platform)
    /// for server rejections and transport failures.
    fn resend_code(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Exchange a refresh token for a fresh grant.
    ///
    /// POST `/auth/refresh-token`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::sign_in`].
    fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> impl std::future::Future<Output = Result<AuthGrant>> + Send;

    /// Start password recovery for an email address.
    ///
    /// POST `/auth/forgot-password`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`](crate::SessionError::Platform)
    /// for server rejections and transport failures.
    fn forgot_password(&self, email: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Finish password recovery.
    ///
    /// POST `/auth/reset-password/:token` with the new password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`](crate::SessionError::Platform)
    /// for rejected tokens and transport failures.
    fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Invalidate the server-side session.
    ///
    /// POST `/auth/logout`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Platform`](crate::SessionError::Platform)
    /// for server rejections and transport failures.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
