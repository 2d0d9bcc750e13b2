//! Session environment.
//!
//! Dependency injection for the session reducers: the auth API plus the
//! platform-side effects every flow touches.

use crate::providers::AuthApi;
use std::sync::Arc;
use wheelbase_platform::{CredentialStore, Navigator, Notifier};

/// Session environment.
///
/// Contains all external dependencies needed by session reducers.
///
/// # Type Parameters
///
/// - `A`: Auth API
#[derive(Clone)]
pub struct SessionEnvironment<A>
where
    A: AuthApi + Clone,
{
    /// Auth API.
    pub api: A,

    /// Credential jar (cookies, keychain).
    pub credentials: Arc<dyn CredentialStore>,

    /// Route navigation.
    pub navigator: Arc<dyn Navigator>,

    /// User-facing notifications (toasts).
    pub notifier: Arc<dyn Notifier>,
}

impl<A> SessionEnvironment<A>
where
    A: AuthApi + Clone,
{
    /// Create a new session environment.
    #[must_use]
    pub fn new(
        api: A,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            credentials,
            navigator,
            notifier,
        }
    }
}
