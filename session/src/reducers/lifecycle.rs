//! Session lifecycle reducer.
//!
//! The three primitive identity mutations every other flow composes
//! (`SetAuth`, `SetAuthInitialized`, `Logout`) plus the sign-out flow.
//!
//! # Flow (sign-out)
//!
//! 1. User requests sign-out
//! 2. Server session is invalidated first (POST `/auth/logout`)
//! 3. On success: purge the credential jar, clear in-memory identity,
//!    notify, navigate to sign-in
//! 4. On failure: the local session is left intact and the failure is
//!    surfaced; nothing is cleared

use crate::actions::SessionAction;
use crate::environment::SessionEnvironment;
use crate::providers::AuthApi;
use crate::state::{FlowStatus, SessionState};
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};
use wheelbase_platform::{Route, purge_credentials};

/// Session lifecycle reducer.
///
/// Handles primitive identity mutations and the sign-out flow.
#[derive(Debug, Clone)]
pub struct LifecycleReducer<A> {
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<A>,
}

impl<A> LifecycleReducer<A> {
    /// Create a new lifecycle reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for LifecycleReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for LifecycleReducer<A>
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
            // SetAuth: apply an identity payload verbatim
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SetAuth {
                user,
                access_token,
                refresh_token,
            } => {
                state.user = user;
                state.access_token = access_token;
                state.refresh_token = refresh_token;
                state.is_authenticated = true;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // SetAuthInitialized: monotonic latch
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SetAuthInitialized(value) => {
                if value {
                    state.is_initialized = true;
                } else {
                    tracing::warn!("initialization latch is monotonic, ignoring reset");
                }
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Logout: clear identity, keep the initialization latch
            // ═══════════════════════════════════════════════════════════════
            SessionAction::Logout => {
                state.user = None;
                state.access_token = None;
                state.refresh_token = None;
                state.is_authenticated = false;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignOutRequested: invalidate the server session first
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignOutRequested => {
                // Re-submission while in flight is dropped, mirroring the
                // disabled submit button.
                if state.sign_out.is_pending() {
                    return smallvec![Effect::None];
                }
                state.sign_out = FlowStatus::Pending;

                let api = env.api.clone();
                let credentials = env.credentials.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.sign_out().await {
                        Ok(()) => {
                            if let Err(error) = purge_credentials(credentials.as_ref()) {
                                tracing::warn!(%error, "credential purge after sign-out failed");
                            }
                            Some(SessionAction::SignOutSucceeded)
                        }
                        Err(error) => {
                            tracing::warn!(%error, "sign-out failed, session left intact");
                            Some(SessionAction::SignOutFailed {
                                message: error.user_message("Signout failed"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignOutSucceeded: clear identity, notify, navigate
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignOutSucceeded => {
                state.user = None;
                state.access_token = None;
                state.refresh_token = None;
                state.is_authenticated = false;
                state.sign_out = FlowStatus::Succeeded;

                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    notifier.success("Sign out successfully");
                    navigator.navigate(Route::SignIn);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignOutFailed: surface, leave the session intact
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignOutFailed {
                message,
                handled_globally,
            } => {
                state.sign_out = FlowStatus::failed_with(message.clone());

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
            // Other actions (not handled by the lifecycle reducer)
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
    use wheelbase_platform::{Role, UserId, UserProfile};
    use wheelbase_testing::{ReducerTest, assertions};

    fn test_env() -> SessionEnvironment<MockAuthApi> {
        SessionEnvironment::new(
            MockAuthApi::new(),
            Arc::new(MockCredentialStore::new()),
            Arc::new(MockNavigator::new()),
            Arc::new(MockNotifier::new()),
        )
    }

    fn rider() -> UserProfile {
        UserProfile {
            id: UserId::new("u-1"),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::User,
            agent_profile_complete: false,
        }
    }

    #[test]
    fn set_auth_applies_payload_and_flips_flag() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let _effects = reducer.reduce(
            &mut state,
            SessionAction::SetAuth {
                user: Some(rider()),
                access_token: Some("access".to_string()),
                refresh_token: Some("refresh".to_string()),
            },
            &env,
        );

        assert!(state.is_authenticated);
        assert_eq!(state.access_token.as_deref(), Some("access"));
        assert_eq!(state.refresh_token.as_deref(), Some("refresh"));
        assert!(state.user.is_some());
    }

    #[test]
    fn set_auth_with_empty_payload_still_flips_flag() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let _effects = reducer.reduce(
            &mut state,
            SessionAction::SetAuth {
                user: None,
                access_token: None,
                refresh_token: None,
            },
            &env,
        );

        // The flag flips unconditionally; guards treat this state as
        // signed out because no user backs it.
        assert!(state.is_authenticated);
        assert!(!state.is_effectively_authenticated());
    }

    #[test]
    fn initialization_latch_is_monotonic() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let _ = reducer.reduce(&mut state, SessionAction::SetAuthInitialized(true), &env);
        assert!(state.is_initialized);

        let _ = reducer.reduce(&mut state, SessionAction::SetAuthInitialized(false), &env);
        assert!(state.is_initialized, "latch must never reset");
    }

    #[test]
    fn logout_clears_identity_but_not_latch() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();
        state.user = Some(rider());
        state.access_token = Some("access".to_string());
        state.refresh_token = Some("refresh".to_string());
        state.is_authenticated = true;
        state.is_initialized = true;

        let _ = reducer.reduce(&mut state, SessionAction::Logout, &env);

        assert!(state.user.is_none());
        assert!(state.access_token.is_none());
        assert!(state.refresh_token.is_none());
        assert!(!state.is_authenticated);
        assert!(state.is_initialized);
    }

    #[test]
    fn logout_is_idempotent() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();

        let _ = reducer.reduce(&mut state, SessionAction::Logout, &env);
        let snapshot = state.clone();
        let _ = reducer.reduce(&mut state, SessionAction::Logout, &env);

        assert_eq!(state, snapshot);
    }

    #[test]
    fn sign_out_request_goes_pending_and_spawns_one_effect() {
        ReducerTest::new(LifecycleReducer::new())
            .with_env(test_env())
            .given_state(SessionState::new())
            .when_action(SessionAction::SignOutRequested)
            .then_state(|state| {
                assert!(state.sign_out.is_pending());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn sign_out_request_is_dropped_while_pending() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();
        state.sign_out = FlowStatus::Pending;

        let effects = reducer.reduce(&mut state, SessionAction::SignOutRequested, &env);

        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::None));
    }

    #[test]
    fn sign_out_success_clears_identity() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();
        state.user = Some(rider());
        state.access_token = Some("access".to_string());
        state.is_authenticated = true;
        state.sign_out = FlowStatus::Pending;

        let effects = reducer.reduce(&mut state, SessionAction::SignOutSucceeded, &env);

        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.sign_out.is_succeeded());
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn sign_out_failure_leaves_session_intact() {
        let reducer = LifecycleReducer::new();
        let env = test_env();
        let mut state = SessionState::new();
        state.user = Some(rider());
        state.access_token = Some("access".to_string());
        state.is_authenticated = true;
        state.sign_out = FlowStatus::Pending;

        let _ = reducer.reduce(
            &mut state,
            SessionAction::SignOutFailed {
                message: "Signout failed".to_string(),
                handled_globally: false,
            },
            &env,
        );

        assert!(state.is_authenticated);
        assert!(state.user.is_some());
        assert!(state.sign_out.is_failed());
    }

    #[test]
    fn globally_handled_sign_out_failure_emits_no_notification() {
        ReducerTest::new(LifecycleReducer::new())
            .with_env(test_env())
            .given_state(SessionState::new())
            .when_action(SessionAction::SignOutFailed {
                message: "Authorization denied".to_string(),
                handled_globally: true,
            })
            .then_state(|state| {
                assert!(state.sign_out.is_failed());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
