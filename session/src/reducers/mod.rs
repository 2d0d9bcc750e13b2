//! Session reducers.
//!
//! This module contains pure reducer functions for the session store.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.

pub mod bootstrap;
pub mod lifecycle;
pub mod recovery;
pub mod sign_in;
pub mod sign_up;

use crate::actions::SessionAction;
use crate::config::SessionConfig;
use crate::environment::SessionEnvironment;
use crate::providers::AuthApi;
use crate::state::SessionState;
use wheelbase_core::{SmallVec, effect::Effect, reducer::Reducer};

// Re-export
pub use bootstrap::BootstrapReducer;
pub use lifecycle::LifecycleReducer;
pub use recovery::RecoveryReducer;
pub use sign_in::SignInReducer;
pub use sign_up::SignUpReducer;

/// Unified session reducer.
///
/// Combines the lifecycle, bootstrap, sign-in, sign-up, and recovery
/// flows into a single reducer. Routes actions to the appropriate
/// sub-reducer based on action type.
#[derive(Clone, Debug)]
pub struct SessionReducer<A>
where
    A: AuthApi + Clone + 'static,
{
    lifecycle: LifecycleReducer<A>,
    bootstrap: BootstrapReducer<A>,
    sign_in: SignInReducer<A>,
    sign_up: SignUpReducer<A>,
    recovery: RecoveryReducer<A>,
}

impl<A> SessionReducer<A>
where
    A: AuthApi + Clone + 'static,
{
    /// Create a unified session reducer with the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(SessionConfig::new())
    }

    /// Create a unified session reducer with a custom policy.
    #[must_use]
    pub const fn with_config(config: SessionConfig) -> Self {
        Self {
            lifecycle: LifecycleReducer::new(),
            bootstrap: BootstrapReducer::new(),
            sign_in: SignInReducer::new(),
            sign_up: SignUpReducer::with_config(config),
            recovery: RecoveryReducer::new(),
        }
    }
}

impl<A> Default for SessionReducer<A>
where
    A: AuthApi + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for SessionReducer<A>
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
        // Route to the appropriate sub-reducer based on action type
        match action {
            // Lifecycle primitives and sign-out
            SessionAction::SetAuth { .. }
            | SessionAction::SetAuthInitialized(_)
            | SessionAction::Logout
            | SessionAction::SignOutRequested
            | SessionAction::SignOutSucceeded
            | SessionAction::SignOutFailed { .. } => self.lifecycle.reduce(state, action, env),

            // Startup bootstrap
            SessionAction::BootstrapRequested | SessionAction::BootstrapCompleted { .. } => {
                self.bootstrap.reduce(state, action, env)
            }

            // Sign-in
            SessionAction::SignInSubmitted { .. }
            | SessionAction::SignInSucceeded { .. }
            | SessionAction::SignInFailed { .. } => self.sign_in.reduce(state, action, env),

            // Sign-up, email verification, code resend
            SessionAction::SignUpSubmitted { .. }
            | SessionAction::SignUpSucceeded { .. }
            | SessionAction::SignUpFailed { .. }
            | SessionAction::VerificationCodeSubmitted { .. }
            | SessionAction::VerificationSucceeded { .. }
            | SessionAction::VerificationFailed { .. }
            | SessionAction::ResendCodeRequested { .. }
            | SessionAction::ResendCodeSucceeded { .. }
            | SessionAction::ResendCodeFailed { .. } => self.sign_up.reduce(state, action, env),

            // Password recovery
            SessionAction::PasswordResetRequested { .. }
            | SessionAction::PasswordResetEmailSent
            | SessionAction::PasswordResetRequestFailed { .. }
            | SessionAction::PasswordResetSubmitted { .. }
            | SessionAction::PasswordResetSucceeded
            | SessionAction::PasswordResetFailed { .. } => {
                self.recovery.reduce(state, action, env)
            }
        }
    }
}
