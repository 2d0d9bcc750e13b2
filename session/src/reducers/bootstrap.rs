//! Session bootstrap reducer.
//!
//! Reconciles persisted credentials into live state, exactly once per
//! process, before any route renders.
//!
//! # Flow
//!
//! 1. Read access token, refresh token, and user snapshot from the jar
//! 2. Access token and user both present: restore them directly, no
//!    server round-trip
//! 3. Only a refresh token present: exchange it for a fresh grant and
//!    persist the new triple; on failure purge the jar and start
//!    signed out
//! 4. Otherwise start signed out
//!
//! Every branch, including jar read failures and refresh errors, ends in
//! a single `BootstrapCompleted` that latches `is_initialized`. The
//! embedding shell gates role-aware rendering on that flag.

use crate::actions::{RestoredAuth, SessionAction};
use crate::environment::SessionEnvironment;
use crate::providers::AuthApi;
use crate::state::{FlowStatus, SessionState};
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};
use wheelbase_platform::{CredentialStore, load_credentials, persist_credentials, purge_credentials};

/// Session bootstrap reducer.
///
/// Handles startup credential restoration.
#[derive(Debug, Clone)]
pub struct BootstrapReducer<A> {
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<A>,
}

impl<A> BootstrapReducer<A> {
    /// Create a new bootstrap reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for BootstrapReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Restore a session from the jar, refreshing over the network when only
/// a refresh token survived. Never fails; every degraded path resolves
/// to `None` (signed out).
async fn restore_session<A: AuthApi>(
    api: &A,
    credentials: &dyn CredentialStore,
) -> Option<RestoredAuth> {
    let stored = match load_credentials(credentials) {
        Ok(stored) => stored,
        Err(error) => {
            tracing::warn!(%error, "credential jar unreadable at startup, starting signed out");
            return None;
        }
    };

    match (stored.access_token, stored.user, stored.refresh_token) {
        (Some(access_token), Some(user), refresh_token) => {
            tracing::debug!("restoring session from stored credentials");
            Some(RestoredAuth {
                user,
                access_token,
                refresh_token,
            })
        }
        (_, _, Some(refresh_token)) => refresh_session(api, credentials, &refresh_token).await,
        _ => None,
    }
}

/// Exchange a refresh token for a fresh grant and persist the new triple.
async fn refresh_session<A: AuthApi>(
    api: &A,
    credentials: &dyn CredentialStore,
    refresh_token: &str,
) -> Option<RestoredAuth> {
    match api.refresh_token(refresh_token).await {
        Ok(grant) => {
            if let Err(error) = persist_credentials(
                credentials,
                &grant.access_token,
                &grant.refresh_token,
                &grant.user,
                true,
            ) {
                tracing::warn!(%error, "credential persistence after refresh failed");
            }
            tracing::debug!("session refreshed at startup");
            Some(RestoredAuth {
                user: grant.user,
                access_token: grant.access_token,
                refresh_token: Some(grant.refresh_token),
            })
        }
        Err(error) => {
            tracing::warn!(%error, "startup token refresh failed, starting signed out");
            if let Err(error) = purge_credentials(credentials) {
                tracing::warn!(%error, "credential purge after failed refresh failed");
            }
            None
        }
    }
}

impl<A> Reducer for BootstrapReducer<A>
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
            // BootstrapRequested: read the jar, once
            // ═══════════════════════════════════════════════════════════════
            SessionAction::BootstrapRequested => {
                if state.is_initialized || state.bootstrap.is_pending() {
                    tracing::warn!("bootstrap already ran or is in flight, ignoring");
                    return smallvec![Effect::None];
                }
                state.bootstrap = FlowStatus::Pending;

                let api = env.api.clone();
                let credentials = env.credentials.clone();

                // Single exit path: whatever happens inside, exactly one
                // BootstrapCompleted comes back.
                smallvec![Effect::Future(Box::pin(async move {
                    Some(SessionAction::BootstrapCompleted {
                        auth: restore_session(&api, credentials.as_ref()).await,
                    })
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // BootstrapCompleted: apply the restored identity, latch the flag
            // ═══════════════════════════════════════════════════════════════
            SessionAction::BootstrapCompleted { auth } => {
                if let Some(auth) = auth {
                    state.user = Some(auth.user);
                    state.access_token = Some(auth.access_token);
                    state.refresh_token = auth.refresh_token;
                    state.is_authenticated = true;
                    tracing::info!("session restored at startup");
                } else {
                    tracing::info!("starting signed out");
                }
                state.is_initialized = true;
                state.bootstrap = FlowStatus::Succeeded;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Other actions (not handled by the bootstrap reducer)
            // ═══════════════════════════════════════════════════════════════
            _ => smallvec![Effect::None],
        }
    }
}
