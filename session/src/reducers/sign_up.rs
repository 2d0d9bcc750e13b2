//! Sign-up and email verification reducer.
//!
//! # Flow
//!
//! 1. Local validation (names, email format, password policy, confirm
//!    match, terms consent); failures block submission with field errors
//! 2. POST `/auth/signup`; success carries a verification token
//! 3. Notify and navigate to `/verification/:token`
//! 4. The emailed 6-digit code is checked locally for shape, then POSTed
//!    to `/auth/verify-code/:token`; success sends the user to sign-in
//! 5. `/auth/resend-code/:token` reissues the code; its outcome is
//!    toasted and tracked nowhere

use crate::actions::SessionAction;
use crate::config::SessionConfig;
use crate::environment::SessionEnvironment;
use crate::providers::{AuthApi, SignUpRequest};
use crate::state::{FieldError, FlowStatus, SessionState};
use crate::validation::{is_valid_code, validate_sign_up};
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};
use wheelbase_platform::Route;

/// Sign-up and email verification reducer.
///
/// Carries the validation policy (password length, code length).
#[derive(Debug, Clone)]
pub struct SignUpReducer<A> {
    config: SessionConfig,
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<A>,
}

impl<A> SignUpReducer<A> {
    /// Create a reducer with the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(SessionConfig::new())
    }

    /// Create a reducer with a custom policy.
    #[must_use]
    pub const fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for SignUpReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for SignUpReducer<A>
where
    A: AuthApi + Clone + 'static,
{
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // SignUpSubmitted: validate locally, then create the account
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignUpSubmitted { form } => {
                if state.sign_up.is_pending() {
                    return smallvec![Effect::None];
                }

                let errors = validate_sign_up(&form, &self.config);
                if !errors.is_empty() {
                    state.sign_up = FlowStatus::Failed(errors);
                    return smallvec![Effect::None];
                }
                state.sign_up = FlowStatus::Pending;

                let request = SignUpRequest {
                    first_name: form.first_name,
                    last_name: form.last_name,
                    email: form.email,
                    password: form.password,
                };
                let api = env.api.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.sign_up(&request).await {
                        Ok(receipt) => Some(SessionAction::SignUpSucceeded {
                            verification_token: receipt.verification_token,
                            message: receipt.message,
                        }),
                        Err(error) => {
                            tracing::warn!(%error, "sign-up failed");
                            Some(SessionAction::SignUpFailed {
                                message: error.user_message("Signup failed"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignUpSucceeded: notify, move to the verification screen
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignUpSucceeded {
                verification_token,
                message,
            } => {
                state.sign_up = FlowStatus::Succeeded;

                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let message =
                        message.unwrap_or_else(|| "Otp Sent To Your Registered Email".to_string());
                    notifier.success(&message);
                    navigator.navigate(Route::Verification {
                        token: verification_token,
                    });
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignUpFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignUpFailed {
                message,
                handled_globally,
            } => {
                state.sign_up = FlowStatus::failed_with(message.clone());

                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // VerificationCodeSubmitted: shape-check the code, then confirm
            // ═══════════════════════════════════════════════════════════════
            SessionAction::VerificationCodeSubmitted { token, code } => {
                if state.verification.is_pending() {
                    return smallvec![Effect::None];
                }

                let length = self.config.verification_code_length;
                if !is_valid_code(&code, length) {
                    state.verification = FlowStatus::Failed(vec![FieldError::new(
                        "code",
                        format!("Please enter valid {length}-digit code"),
                    )]);
                    return smallvec![Effect::None];
                }
                state.verification = FlowStatus::Pending;

                let api = env.api.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.verify_code(&token, &code).await {
                        Ok(message) => Some(SessionAction::VerificationSucceeded { message }),
                        Err(error) => {
                            tracing::warn!(%error, "email verification failed");
                            Some(SessionAction::VerificationFailed {
                                message: error.user_message("Verification failed"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // VerificationSucceeded: notify, send the user to sign-in
            // ═══════════════════════════════════════════════════════════════
            SessionAction::VerificationSucceeded { message } => {
                state.verification = FlowStatus::Succeeded;

                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let message = message
                        .unwrap_or_else(|| "Verification Successful, Please Signin".to_string());
                    notifier.success(&message);
                    navigator.navigate(Route::SignIn);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // VerificationFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            SessionAction::VerificationFailed {
                message,
                handled_globally,
            } => {
                state.verification = FlowStatus::failed_with(message.clone());

                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // ResendCodeRequested: reissue the code, stateless
            // ═══════════════════════════════════════════════════════════════
            SessionAction::ResendCodeRequested { token } => {
                let api = env.api.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.resend_code(&token).await {
                        Ok(message) => Some(SessionAction::ResendCodeSucceeded { message }),
                        Err(error) => {
                            tracing::warn!(%error, "verification code resend failed");
                            Some(SessionAction::ResendCodeFailed {
                                message: error.user_message("Failed to resend code"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // Resend outcomes: toast only, no state to track
            // ═══════════════════════════════════════════════════════════════
            SessionAction::ResendCodeSucceeded { message } => {
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let message =
                        message.unwrap_or_else(|| "Verification code resent".to_string());
                    notifier.success(&message);
                    None
                }))]
            }

            SessionAction::ResendCodeFailed {
                message,
                handled_globally,
            } => {
                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // Other actions (not handled by the sign-up reducer)
            // ═══════════════════════════════════════════════════════════════
            _ => smallvec![Effect::None],
        }
    }
}
