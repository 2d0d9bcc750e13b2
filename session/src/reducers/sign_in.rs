//! Sign-in reducer.
//!
//! # Flow
//!
//! 1. Local validation (email format, password presence); failures set
//!    field errors and make no network call
//! 2. POST `/auth/signin`
//! 3. On success: persist the credential triple under the remember-me
//!    policy, apply the identity, notify, navigate to the role home
//! 4. On failure: record the server message (or the stock fallback) and
//!    surface it

use crate::actions::SessionAction;
use crate::environment::SessionEnvironment;
use crate::guards::role_home;
use crate::providers::AuthApi;
use crate::state::{FlowStatus, SessionState};
use crate::validation::validate_sign_in;
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};
use wheelbase_platform::{Role, persist_credentials};

/// Sign-in reducer.
///
/// Handles the credential exchange and post-sign-in navigation.
#[derive(Debug, Clone)]
pub struct SignInReducer<A> {
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<A>,
}

impl<A> SignInReducer<A> {
    /// Create a new sign-in reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for SignInReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for SignInReducer<A>
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
            // SignInSubmitted: validate locally, then exchange credentials
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignInSubmitted {
                email,
                password,
                remember_me,
            } => {
                if state.sign_in.is_pending() {
                    return smallvec![Effect::None];
                }

                let errors = validate_sign_in(&email, &password);
                if !errors.is_empty() {
                    state.sign_in = FlowStatus::Failed(errors);
                    return smallvec![Effect::None];
                }
                state.sign_in = FlowStatus::Pending;

                let api = env.api.clone();
                let credentials = env.credentials.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match api.sign_in(&email, &password).await {
                        Ok(grant) => {
                            // Jar write failures downgrade to an in-memory
                            // session; the exchange itself succeeded.
                            if let Err(error) = persist_credentials(
                                credentials.as_ref(),
                                &grant.access_token,
                                &grant.refresh_token,
                                &grant.user,
                                remember_me,
                            ) {
                                tracing::warn!(%error, "credential persistence failed");
                            }
                            Some(SessionAction::SignInSucceeded {
                                user: grant.user,
                                access_token: grant.access_token,
                                refresh_token: grant.refresh_token,
                            })
                        }
                        Err(error) => {
                            tracing::warn!(%error, "sign-in failed");
                            Some(SessionAction::SignInFailed {
                                message: error.user_message("Signin failed"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignInSucceeded: apply identity, greet, go to the role home
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignInSucceeded {
                user,
                access_token,
                refresh_token,
            } => {
                let greeting = if user.role == Role::Agent && !user.agent_profile_complete {
                    "Signin Successful - Please complete your profile"
                } else {
                    "Signin Successful"
                };
                let destination = role_home(user.role, user.agent_profile_complete);

                state.user = Some(user);
                state.access_token = Some(access_token);
                state.refresh_token = Some(refresh_token);
                state.is_authenticated = true;
                state.sign_in = FlowStatus::Succeeded;

                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    notifier.success(greeting);
                    navigator.navigate(destination);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // SignInFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            SessionAction::SignInFailed {
                message,
                handled_globally,
            } => {
                state.sign_in = FlowStatus::failed_with(message.clone());

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
            // Other actions (not handled by the sign-in reducer)
            // ═══════════════════════════════════════════════════════════════
            _ => smallvec![Effect::None],
        }
    }
}
