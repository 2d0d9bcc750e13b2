//! The navigation port.

use crate::routes::Route;

/// Host-platform navigation.
///
/// `navigate` is an ordinary in-app transition. `force_redirect` replaces
/// the current location outright, discarding in-memory state; only the
/// global authorization-denied handler uses it, so that nothing stale
/// survives a credential purge.
pub trait Navigator: Send + Sync {
    /// Transition to `route` within the running shell.
    fn navigate(&self, route: Route);

    /// Hard-replace the current location with `route`.
    fn force_redirect(&self, route: Route);
}
