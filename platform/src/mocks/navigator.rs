//! Navigation recorder.

use std::sync::{Arc, Mutex};

use crate::navigation::Navigator;
use crate::routes::Route;

/// One recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCall {
    /// In-app transition.
    Navigate(Route),
    /// Full-page replacement.
    ForceRedirect(Route),
}

impl NavigationCall {
    /// The destination route, whichever kind of call it was.
    #[must_use]
    pub const fn route(&self) -> &Route {
        match self {
            Self::Navigate(route) | Self::ForceRedirect(route) => route,
        }
    }
}

/// Navigator that records every call for assertions.
///
/// Clones share the recording.
#[derive(Debug, Clone, Default)]
pub struct MockNavigator {
    calls: Arc<Mutex<Vec<NavigationCall>>>,
}

impl MockNavigator {
    /// Create a navigator with an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls
            .lock()
            .map_or_else(|_| Vec::new(), |calls| calls.clone())
    }

    /// The most recent call, if any.
    #[must_use]
    pub fn last(&self) -> Option<NavigationCall> {
        self.calls
            .lock()
            .ok()
            .and_then(|calls| calls.last().cloned())
    }

    /// `true` when `route` was the target of any recorded call.
    #[must_use]
    pub fn visited(&self, route: &Route) -> bool {
        self.calls
            .lock()
            .is_ok_and(|calls| calls.iter().any(|call| call.route() == route))
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(NavigationCall::Navigate(route));
        }
    }

    fn force_redirect(&self, route: Route) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(NavigationCall::ForceRedirect(route));
        }
    }
}
