//! Session state.
//!
//! The single source of truth for the authenticated identity of the client.
//! Every mutation flows through [`SessionAction`](crate::actions::SessionAction)
//! and the session reducers; nothing else writes these fields.

use serde::{Deserialize, Serialize};
use wheelbase_platform::{Role, UserProfile};

// ═══════════════════════════════════════════════════════════════════════════
// Flow Status
// ═══════════════════════════════════════════════════════════════════════════

pub use wheelbase_platform::{FieldError, FieldErrors};

/// Progress of one authentication flow, exposed so a UI can render
/// spinners and error text without holding private state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowStatus {
    /// Nothing in flight and nothing to report.
    #[default]
    Idle,
    /// A submission is in flight.
    Pending,
    /// The last submission completed successfully.
    Succeeded,
    /// The last submission failed with these field errors.
    Failed(FieldErrors),
}

impl FlowStatus {
    /// `true` while a submission is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// `true` once the last submission completed successfully.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// `true` when the last submission failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Build a failed status from a single whole-form message.
    #[must_use]
    pub fn failed_with(message: impl Into<String>) -> Self {
        Self::Failed(vec![FieldError::form(message)])
    }

    /// The message recorded for `field`, if this status is a failure that
    /// carries one.
    #[must_use]
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Failed(errors) => errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Session State
// ═══════════════════════════════════════════════════════════════════════════

/// Client-held authentication state.
///
/// Created empty at startup, populated by sign-in or bootstrap, cleared by
/// sign-out or a globally handled authorization denial.
///
/// `is_authenticated` is meant to be true exactly when `user` and
/// `access_token` are both present, but [`SetAuth`] itself performs no
/// validation; route guards re-check the conjunction themselves
/// ([`guards`](crate::guards)).
///
/// [`SetAuth`]: crate::actions::SessionAction::SetAuth
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// The signed-in user, if any.
    pub user: Option<UserProfile>,

    /// Short-lived bearer token for API calls.
    pub access_token: Option<String>,

    /// Long-lived token exchanged for a new pair at bootstrap.
    pub refresh_token: Option<String>,

    /// Whether the session claims to be authenticated.
    pub is_authenticated: bool,

    /// Whether startup bootstrap has completed. Latches true exactly once
    /// per process and never resets.
    pub is_initialized: bool,

    /// Progress of the startup bootstrap.
    pub bootstrap: FlowStatus,

    /// Progress of the sign-in flow.
    pub sign_in: FlowStatus,

    /// Progress of the sign-up flow.
    pub sign_up: FlowStatus,

    /// Progress of the email verification flow.
    pub verification: FlowStatus,

    /// Progress of the password recovery flow.
    pub recovery: FlowStatus,

    /// Progress of the sign-out flow.
    pub sign_out: FlowStatus,
}

impl SessionState {
    /// Empty, unauthenticated, uninitialized session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Role of the signed-in user, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Effective authentication as the guards see it: the authenticated
    /// flag backed by both a user record and an access token. A session
    /// claiming authentication without either is treated as signed out.
    #[must_use]
    pub const fn is_effectively_authenticated(&self) -> bool {
        self.is_authenticated && self.user.is_some() && self.access_token.is_some()
    }
}
