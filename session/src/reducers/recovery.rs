//! Password recovery reducer.
//!
//! # Flow
//!
//! 1. `PasswordResetRequested` mails a reset link; the only local check
//!    is a non-empty address, and the outcome toast is a fixed string
//!    either way so the endpoint cannot be used to probe for accounts
//! 2. `PasswordResetSubmitted` carries the token from the emailed link;
//!    confirm-match and token presence are checked locally
//! 3. POST `/auth/reset-password/:token` with the new password; success
//!    notifies and navigates to sign-in

use crate::actions::SessionAction;
use crate::environment::SessionEnvironment;
use crate::providers::AuthApi;
use crate::state::{FieldError, FlowStatus, SessionState};
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};
use wheelbase_platform::Route;

/// Fixed toast for a failed reset-link request.
const FORGOT_FAILED: &str = "Failed to send forgot password request. Please try again later.";

/// Fixed toast for a failed password reset.
const RESET_FAILED: &str = "Failed to reset password. Please try again.";

/// Password recovery reducer.
///
/// Handles the reset-link request and the reset submission.
#[derive(Debug, Clone)]
pub struct RecoveryReducer<A> {
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<A>,
}

impl<A> RecoveryReducer<A> {
    /// Create a new recovery reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for RecoveryReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for RecoveryReducer<A>
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
            // PasswordResetRequested: mail the reset link
            // ═══════════════════════════════════════════════════════════════
            SessionAction::PasswordResetRequested { email } => {
                if state.recovery.is_pending() {
                    return smallvec![Effect::None];
                }

                if email.trim().is_empty() {
                    let message = "Please enter your email address.";
                    state.recovery =
                        FlowStatus::Failed(vec![FieldError::new("email", message)]);
                    let notifier = env.notifier.clone();
                    return smallvec![Effect::Future(Box::pin(async move {
                        notifier.error(message);
                        None
                    }))];
                }
                state.recovery = FlowStatus::Pending;

                let api = env.api.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.forgot_password(&email).await {
                        Ok(()) => Some(SessionAction::PasswordResetEmailSent),
                        Err(error) => {
                            tracing::warn!(%error, "reset link request failed");
                            Some(SessionAction::PasswordResetRequestFailed {
                                message: FORGOT_FAILED.to_string(),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PasswordResetEmailSent: acknowledge, stay on the page
            // ═══════════════════════════════════════════════════════════════
            SessionAction::PasswordResetEmailSent => {
                state.recovery = FlowStatus::Succeeded;

                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.success("Please Check Your Email For Reset Link");
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PasswordResetRequestFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            SessionAction::PasswordResetRequestFailed {
                message,
                handled_globally,
            } => {
                state.recovery = FlowStatus::failed_with(message.clone());

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
            // PasswordResetSubmitted: local checks, then reset
            // ═══════════════════════════════════════════════════════════════
            SessionAction::PasswordResetSubmitted {
                token,
                new_password,
                confirm_password,
            } => {
                if state.recovery.is_pending() {
                    return smallvec![Effect::None];
                }

                if new_password != confirm_password {
                    let message = "Passwords do not match";
                    state.recovery =
                        FlowStatus::Failed(vec![FieldError::new("confirm_password", message)]);
                    let notifier = env.notifier.clone();
                    return smallvec![Effect::Future(Box::pin(async move {
                        notifier.error(message);
                        None
                    }))];
                }
                if token.is_empty() {
                    let message = "Invalid token";
                    state.recovery = FlowStatus::failed_with(message);
                    let notifier = env.notifier.clone();
                    return smallvec![Effect::Future(Box::pin(async move {
                        notifier.error(message);
                        None
                    }))];
                }
                state.recovery = FlowStatus::Pending;

                let api = env.api.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.reset_password(&token, &new_password).await {
                        Ok(()) => Some(SessionAction::PasswordResetSucceeded),
                        Err(error) => {
                            tracing::warn!(%error, "password reset failed");
                            Some(SessionAction::PasswordResetFailed {
                                message: RESET_FAILED.to_string(),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PasswordResetSucceeded: notify, send the user to sign-in
            // ═══════════════════════════════════════════════════════════════
            SessionAction::PasswordResetSucceeded => {
                state.recovery = FlowStatus::Succeeded;

                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    notifier.success("Password reset successfully, You Can Now Signin");
                    navigator.navigate(Route::SignIn);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PasswordResetFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            SessionAction::PasswordResetFailed {
                message,
                handled_globally,
            } => {
                state.recovery = FlowStatus::failed_with(message.clone());

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
            // Other actions (not handled by the recovery reducer)
            // ═══════════════════════════════════════════════════════════════
            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockAuthApi;
    use std::sync::Arc;
    use wheelbase_platform::mocks::{MockCredentialStore, MockNavigator, MockNotifier};

    fn test_env() -> SessionEnvironment<MockAuthApi> {
        SessionEnvironment::new(
            MockAuthApi::new(),
            Arc::new(MockCredentialStore::new()),
            Arc::new(MockNavigator::new()),
            Arc::new(MockNotifier::new()),
        )
    }

    #[test]
    fn empty_email_blocks_the_request() {
        let reducer = RecoveryReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let effects = reducer.reduce(
            &mut state,
            SessionAction::PasswordResetRequested {
                email: "  ".to_string(),
            },
            &env,
        );

        assert!(state.recovery.is_failed());
        assert_eq!(
            state.recovery.field_message("email"),
            Some("Please enter your email address.")
        );
        // The message is toasted, not just recorded.
        assert!(matches!(effects[0], Effect::Future(_)));
    }

    #[test]
    fn reset_request_goes_pending() {
        let reducer = RecoveryReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let effects = reducer.reduce(
            &mut state,
            SessionAction::PasswordResetRequested {
                email: "asha@example.com".to_string(),
            },
            &env,
        );

        assert!(state.recovery.is_pending());
        assert!(matches!(effects[0], Effect::Future(_)));
    }

    #[test]
    fn mismatched_passwords_block_the_reset() {
        let reducer = RecoveryReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let _ = reducer.reduce(
            &mut state,
            SessionAction::PasswordResetSubmitted {
                token: "rt-1".to_string(),
                new_password: "newpassword".to_string(),
                confirm_password: "different".to_string(),
            },
            &env,
        );

        assert_eq!(
            state.recovery.field_message("confirm_password"),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn empty_token_blocks_the_reset() {
        let reducer = RecoveryReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let _ = reducer.reduce(
            &mut state,
            SessionAction::PasswordResetSubmitted {
                token: String::new(),
                new_password: "newpassword".to_string(),
                confirm_password: "newpassword".to_string(),
            },
            &env,
        );

        assert_eq!(state.recovery.field_message("form"), Some("Invalid token"));
    }

    #[test]
    fn valid_reset_goes_pending() {
        let reducer = RecoveryReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let effects = reducer.reduce(
            &mut state,
            SessionAction::PasswordResetSubmitted {
                token: "rt-1".to_string(),
                new_password: "newpassword".to_string(),
                confirm_password: "newpassword".to_string(),
            },
            &env,
        );

        assert!(state.recovery.is_pending());
        assert!(matches!(effects[0], Effect::Future(_)));
    }

    #[test]
    fn reset_success_is_recorded() {
        let reducer = RecoveryReducer::new();
        let env = test_env();
        let mut state = SessionState::new();
        state.recovery = FlowStatus::Pending;

        let effects =
            reducer.reduce(&mut state, SessionAction::PasswordResetSucceeded, &env);

        assert!(state.recovery.is_succeeded());
        assert!(matches!(effects[0], Effect::Future(_)));
    }
}
