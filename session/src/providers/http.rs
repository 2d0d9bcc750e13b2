//! [`AuthApi`] over the shared platform HTTP adapter.

use super::{AuthApi, AuthGrant, SignUpReceipt, SignUpRequest};
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use wheelbase_platform::http::ApiClient;
use wheelbase_platform::{Envelope, endpoints};

/// Production [`AuthApi`] speaking to the rental API.
///
/// Cheap to clone; clones share the adapter's connection pool. The
/// global 401 policy (credential purge, sign-in redirect) lives in the
/// adapter, so every method here inherits it.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

/// `data` body of `/auth/signup`: the verification token alone. The
/// acknowledgement message rides the envelope.
#[derive(Debug, Deserialize)]
struct SignUpData {
    token: String,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    token: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct ForgotBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetBody<'a> {
    new_password: &'a str,
}

impl HttpAuthApi {
    /// Build over an existing adapter.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant> {
        let envelope: Envelope<AuthGrant> = self
            .client
            .post(endpoints::auth::SIGNIN, &SignInBody { email, password })
            .await?;
        envelope
            .data
            .ok_or(SessionError::MissingPayload(endpoints::auth::SIGNIN))
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpReceipt> {
        let envelope: Envelope<SignUpData> =
            self.client.post(endpoints::auth::SIGNUP, request).await?;
        let Envelope { message, data, .. } = envelope;
        let data = data.ok_or(SessionError::MissingPayload(endpoints::auth::SIGNUP))?;
        Ok(SignUpReceipt {
            verification_token: data.token,
            message,
        })
    }

    async fn verify_code(&self, token: &str, code: &str) -> Result<Option<String>> {
        let envelope: Envelope<serde_json::Value> = self
            .client
            .post(&endpoints::auth::verify_code(token), &VerifyBody {
                token,
                code,
            })
            .await?;
        Ok(envelope.message)
    }

    async fn resend_code(&self, token: &str) -> Result<Option<String>> {
        let envelope: Envelope<serde_json::Value> = self
            .client
            .post_empty(&endpoints::auth::resend_code(token))
            .await?;
        Ok(envelope.message)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthGrant> {
        let envelope: Envelope<AuthGrant> = self
            .client
            .post(endpoints::auth::REFRESH_TOKEN, &RefreshBody {
                refresh_token,
            })
            .await?;
        envelope
            .data
            .ok_or(SessionError::MissingPayload(endpoints::auth::REFRESH_TOKEN))
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        let _: Envelope<serde_json::Value> = self
            .client
            .post(endpoints::auth::FORGOT_PASSWORD, &ForgotBody { email })
            .await?;
        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let _: Envelope<serde_json::Value> = self
            .client
            .post(&endpoints::auth::reset_password(token), &ResetBody {
                new_password,
            })
            .await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        let _: Envelope<serde_json::Value> = self
            .client
            .post_empty(endpoints::auth::LOGOUT)
            .await?;
        Ok(())
    }
}
