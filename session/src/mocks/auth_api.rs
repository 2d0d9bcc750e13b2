//! Mock auth API for testing.

use crate::error::Result;
use crate::providers::{AuthApi, AuthGrant, SignUpReceipt, SignUpRequest};
use std::sync::{Arc, Mutex};
use wheelbase_platform::{PlatformError, Role, UserId, UserProfile};

/// One recorded API call, oldest first in [`MockAuthApi::calls`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    /// Credential exchange.
    SignIn {
        /// Email as submitted.
        email: String,
        /// Password as submitted.
        password: String,
    },
    /// Account creation.
    SignUp {
        /// Email as submitted.
        email: String,
    },
    /// Code confirmation.
    VerifyCode {
        /// Verification token.
        token: String,
        /// Code as submitted.
        code: String,
    },
    /// Code reissue.
    ResendCode {
        /// Verification token.
        token: String,
    },
    /// Token refresh.
    RefreshToken {
        /// Refresh token as submitted.
        token: String,
    },
    /// Reset-link request.
    ForgotPassword {
        /// Email as submitted.
        email: String,
    },
    /// Password reset.
    ResetPassword {
        /// Reset token.
        token: String,
    },
    /// Server session invalidation.
    SignOut,
}

/// How a programmed failure presents.
#[derive(Debug, Clone)]
enum FailureMode {
    /// Server rejection carrying this message.
    Api(String),
    /// Authorization denial, as after the adapter's global 401 handling.
    Denied,
}

#[derive(Debug, Default)]
struct Inner {
    grant: Option<AuthGrant>,
    receipt: Option<SignUpReceipt>,
    message: Option<String>,
    failure: Option<FailureMode>,
    calls: Vec<AuthCall>,
}

/// Mock auth API.
///
/// Succeeds by default with generated tokens and a stock rider profile;
/// outcomes are programmable per instance. Clones share state.
///
/// **WARNING**: Do NOT use in production. This is for testing only!
#[derive(Clone, Default)]
pub struct MockAuthApi {
    inner: Arc<Mutex<Inner>>,
}

/// Generate an opaque token (256-bit random, base64url).
fn generate_token() -> String {
    use base64::Engine;
    use rand::RngCore;

    let mut rng = rand::thread_rng();
    let mut random_bytes = [0u8; 32];
    rng.fill_bytes(&mut random_bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Stock profile handed out when no grant was programmed.
fn stock_rider() -> UserProfile {
    UserProfile {
        id: UserId::new(uuid::Uuid::new_v4().to_string()),
        first_name: "Mock".to_string(),
        last_name: "Rider".to_string(),
        email: "rider@example.com".to_string(),
        role: Role::User,
        agent_profile_complete: false,
    }
}

impl MockAuthApi {
    /// Create a mock that succeeds with generated outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the grant returned by sign-in and refresh.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_grant(self, access_token: &str, refresh_token: &str, user: UserProfile) -> Self {
        self.inner.lock().unwrap().grant = Some(AuthGrant {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            user,
        });
        self
    }

    /// Program the sign-up receipt.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_sign_up_receipt(self, verification_token: &str, message: Option<&str>) -> Self {
        self.inner.lock().unwrap().receipt = Some(SignUpReceipt {
            verification_token: verification_token.to_string(),
            message: message.map(str::to_string),
        });
        self
    }

    /// Program the acknowledgement message returned by verification and
    /// resend calls.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_message(self, message: &str) -> Self {
        self.inner.lock().unwrap().message = Some(message.to_string());
        self
    }

    /// Make every call fail with a server rejection carrying `message`.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn failing_with(self, message: &str) -> Self {
        self.inner.lock().unwrap().failure = Some(FailureMode::Api(message.to_string()));
        self
    }

    /// Make every call fail as an authorization denial (the state after
    /// the adapter's global 401 handling has run).
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn denying(self) -> Self {
        self.inner.lock().unwrap().failure = Some(FailureMode::Denied);
        self
    }

    /// Every call recorded so far, oldest first.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn calls(&self) -> Vec<AuthCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of sign-in exchanges.
    #[must_use]
    pub fn sign_in_calls(&self) -> usize {
        self.count(|call| matches!(call, AuthCall::SignIn { .. }))
    }

    /// Number of refresh exchanges.
    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        self.count(|call| matches!(call, AuthCall::RefreshToken { .. }))
    }

    /// Number of sign-out calls.
    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.count(|call| matches!(call, AuthCall::SignOut))
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn count(&self, predicate: impl Fn(&AuthCall) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn record(&self, call: AuthCall) -> Option<FailureMode> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner.failure.clone()
    }

    fn check(&self, call: AuthCall) -> Result<()> {
        match self.record(call) {
            None => Ok(()),
            Some(FailureMode::Api(message)) => Err(PlatformError::Api {
                status: 400,
                message,
            }
            .into()),
            Some(FailureMode::Denied) => Err(PlatformError::AuthorizationDenied.into()),
        }
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn grant(&self) -> AuthGrant {
        self.inner.lock().unwrap().grant.clone().unwrap_or_else(|| AuthGrant {
            access_token: generate_token(),
            refresh_token: generate_token(),
            user: stock_rider(),
        })
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn message(&self) -> Option<String> {
        self.inner.lock().unwrap().message.clone()
    }
}

impl AuthApi for MockAuthApi {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant> {
        self.check(AuthCall::SignIn {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        Ok(self.grant())
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpReceipt> {
        self.check(AuthCall::SignUp {
            email: request.email.clone(),
        })?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .receipt
            .clone()
            .unwrap_or_else(|| SignUpReceipt {
                verification_token: generate_token(),
                message: None,
            }))
    }

    async fn verify_code(&self, token: &str, code: &str) -> Result<Option<String>> {
        self.check(AuthCall::VerifyCode {
            token: token.to_string(),
            code: code.to_string(),
        })?;
        Ok(self.message())
    }

    async fn resend_code(&self, token: &str) -> Result<Option<String>> {
        self.check(AuthCall::ResendCode {
            token: token.to_string(),
        })?;
        Ok(self.message())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthGrant> {
        self.check(AuthCall::RefreshToken {
            token: refresh_token.to_string(),
        })?;
        Ok(self.grant())
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        self.check(AuthCall::ForgotPassword {
            email: email.to_string(),
        })
    }

    async fn reset_password(&self, token: &str, _new_password: &str) -> Result<()> {
        self.check(AuthCall::ResetPassword {
            token: token.to_string(),
        })
    }

    async fn sign_out(&self) -> Result<()> {
        self.check(AuthCall::SignOut)
    }
}
