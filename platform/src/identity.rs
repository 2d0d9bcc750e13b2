//! User identity vocabulary: account roles and the wire-format user profile.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user account.
///
/// The server issues opaque string ids; the client stores and echoes them
/// without inspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a user id from its wire representation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Account role as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Customer renting cars.
    User,
    /// Delivery agent fulfilling bookings.
    Agent,
    /// Back-office administrator.
    Admin,
}

impl Role {
    /// Wire spelling of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Agent => "AGENT",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated user record as returned by the server.
///
/// Field names follow the server's camelCase contract; the same shape is
/// persisted as the `user` snapshot in the credential jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Server-assigned account id.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Sign-in email address.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Whether an agent has completed their delivery profile.
    ///
    /// The server omits this for non-agent accounts; missing means
    /// incomplete.
    #[serde(default)]
    pub agent_profile_complete: bool,
}

impl UserProfile {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
