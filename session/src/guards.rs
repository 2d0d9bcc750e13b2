//! Route authorization guards.
//!
//! Pure, synchronous decisions over a [`SessionState`] snapshot,
//! re-evaluated by the shell on every navigation. No network, no clock, no
//! mutation; each guard is a function of the
//! `(authenticated, role, profile_complete)` tuple only.
//!
//! Effective authentication is stricter than the raw flag:
//! [`SessionState::is_effectively_authenticated`] also demands a user
//! record and an access token, so a malformed `SetAuth` payload (flag set,
//! user missing) never passes a role gate. Unauthenticated hits on any
//! role-gated route land on sign-in, never an error page.

use crate::state::SessionState;
use wheelbase_platform::{Role, Route};

/// Outcome of evaluating a guard against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested route.
    Allow,
    /// Navigate to this route instead.
    Redirect(Route),
}

impl GuardDecision {
    /// `true` when the requested route may render.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The redirect target, if the guard denied the route.
    #[must_use]
    pub const fn redirect_target(&self) -> Option<&Route> {
        match self {
            Self::Allow => None,
            Self::Redirect(route) => Some(route),
        }
    }
}

/// Landing route for a signed-in role.
///
/// Agents with an incomplete delivery profile land on the profile form
/// instead of the dashboard.
#[must_use]
pub const fn role_home(role: Role, profile_complete: bool) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard,
        Role::Agent => {
            if profile_complete {
                Route::AgentDashboard
            } else {
                Route::AgentProfile
            }
        }
        Role::User => Route::Home,
    }
}

fn role_gate(state: &SessionState, required: Role) -> GuardDecision {
    if state.is_effectively_authenticated() && state.role() == Some(required) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Route::SignIn)
    }
}

/// Admin back-office routes.
#[must_use]
pub fn admin_only(state: &SessionState) -> GuardDecision {
    role_gate(state, Role::Admin)
}

/// Agent routes (dashboard subtree and profile form).
#[must_use]
pub fn agent_only(state: &SessionState) -> GuardDecision {
    role_gate(state, Role::Agent)
}

/// Customer routes (profile, cars, bookings, payment pages).
#[must_use]
pub fn user_only(state: &SessionState) -> GuardDecision {
    role_gate(state, Role::User)
}

/// Public authentication pages (sign-in, sign-up, reset, verification).
///
/// Anyone signed out may visit; a signed-in user is bounced to their role
/// home instead.
#[must_use]
pub fn auth_only(state: &SessionState) -> GuardDecision {
    if !state.is_effectively_authenticated() {
        return GuardDecision::Allow;
    }
    match state.role() {
        Some(role) => {
            let profile_complete = state
                .user
                .as_ref()
                .is_some_and(|u| u.agent_profile_complete);
            GuardDecision::Redirect(role_home(role, profile_complete))
        }
        // Unreachable with effective auth, kept total.
        None => GuardDecision::Allow,
    }
}

/// The agent profile form: only an agent who has not completed their
/// profile may see it.
#[must_use]
pub fn agent_profile_gate(state: &SessionState) -> GuardDecision {
    if !state.is_effectively_authenticated() || state.role() != Some(Role::Agent) {
        return GuardDecision::Redirect(Route::SignIn);
    }
    if state
        .user
        .as_ref()
        .is_some_and(|u| u.agent_profile_complete)
    {
        return GuardDecision::Redirect(Route::AgentDashboard);
    }
    GuardDecision::Allow
}

/// The agent dashboard subtree: requires a completed profile.
///
/// Composed after [`agent_only`] in the route table, but checks the role
/// itself so a direct hit cannot slip through.
#[must_use]
pub fn agent_dashboard_gate(state: &SessionState) -> GuardDecision {
    if !state.is_effectively_authenticated() || state.role() != Some(Role::Agent) {
        return GuardDecision::Redirect(Route::SignIn);
    }
    if state
        .user
        .as_ref()
        .is_some_and(|u| u.agent_profile_complete)
    {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Route::AgentProfile)
    }
}

/// The landing page: guests and customers render it; admins and agents
/// are bounced to their dashboards.
#[must_use]
pub fn home(state: &SessionState) -> GuardDecision {
    if state.is_effectively_authenticated() {
        match state.role() {
            Some(Role::Admin) => return GuardDecision::Redirect(Route::AdminDashboard),
            Some(Role::Agent) => return GuardDecision::Redirect(Route::AgentDashboard),
            _ => {}
        }
    }
    GuardDecision::Allow
}
