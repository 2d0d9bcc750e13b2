//! The credential jar port and its persistence policy.
//!
//! The host keeps three durable entries between launches: the access token,
//! the refresh token, and a JSON snapshot of the signed-in user. Under
//! "remember me" the access token and user snapshot live one day and the
//! refresh token seven; without it all three are session-scoped and vanish
//! when the host session ends.

use crate::error::{PlatformError, Result};
use crate::identity::UserProfile;

/// Jar entry holding the short-lived API access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Jar entry holding the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Jar entry holding the JSON-serialized user snapshot.
pub const USER_KEY: &str = "user";

/// Days the access token and user snapshot persist under "remember me".
pub const ACCESS_TTL_DAYS: i64 = 1;
/// Days the refresh token persists under "remember me".
pub const REFRESH_TTL_DAYS: i64 = 7;

/// Lifetime of a jar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Cleared when the hosting session ends.
    Session,
    /// Expires this many days after being written.
    Days(i64),
}

/// Durable credential storage owned by the host platform.
///
/// Implementations wrap whatever the host offers (browser cookies, a
/// keychain, a flat file). The API is synchronous because every known host
/// exposes it that way; an implementation backed by slow I/O should keep
/// its own cache.
pub trait CredentialStore: Send + Sync {
    /// Read the raw value stored under `key`, if present and unexpired.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::CredentialStore`] if the backing store
    /// cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key` with the given lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::CredentialStore`] if the backing store
    /// cannot be written.
    fn write(&self, key: &str, value: &str, expiry: Expiry) -> Result<()>;

    /// Remove the entry stored under `key`. Removing a missing key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::CredentialStore`] if the backing store
    /// cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Snapshot of the three jar entries as read at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCredentials {
    /// API access token, if present and unexpired.
    pub access_token: Option<String>,
    /// Refresh token, if present and unexpired.
    pub refresh_token: Option<String>,
    /// Last known user snapshot, if present and still parseable.
    pub user: Option<UserProfile>,
}

impl StoredCredentials {
    /// `true` when the jar holds everything needed to restore a session
    /// without a server round-trip.
    #[must_use]
    pub const fn is_restorable(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    /// `true` when only a refresh token survives, the one case that
    /// warrants a silent refresh attempt at startup.
    #[must_use]
    pub const fn is_refresh_only(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_some()
    }
}

/// Read all three entries from the jar.
///
/// A user snapshot that fails to parse is treated as absent (and logged);
/// a corrupt jar must never wedge startup.
///
/// # Errors
///
/// Returns [`PlatformError::CredentialStore`] if the jar itself cannot be
/// read.
pub fn load_credentials(store: &dyn CredentialStore) -> Result<StoredCredentials> {
    let access_token = store.read(ACCESS_TOKEN_KEY)?;
    let refresh_token = store.read(REFRESH_TOKEN_KEY)?;
    let user = match store.read(USER_KEY)? {
        Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::warn!(%error, "discarding unparseable user snapshot");
                None
            }
        },
        None => None,
    };

    Ok(StoredCredentials {
        access_token,
        refresh_token,
        user,
    })
}

/// Persist a full sign-in triple under the remember-me policy.
///
/// With `remember_me` the access token and user snapshot persist for
/// [`ACCESS_TTL_DAYS`] and the refresh token for [`REFRESH_TTL_DAYS`];
/// without it all three are session-scoped.
///
/// # Errors
///
/// Returns [`PlatformError::CredentialStore`] if any entry cannot be
/// written, or [`PlatformError::Internal`] if the user snapshot cannot be
/// serialized.
pub fn persist_credentials(
    store: &dyn CredentialStore,
    access_token: &str,
    refresh_token: &str,
    user: &UserProfile,
    remember_me: bool,
) -> Result<()> {
    let (short_expiry, refresh_expiry) = if remember_me {
        (Expiry::Days(ACCESS_TTL_DAYS), Expiry::Days(REFRESH_TTL_DAYS))
    } else {
        (Expiry::Session, Expiry::Session)
    };

    let user_json = serde_json::to_string(user)
        .map_err(|e| PlatformError::Internal(format!("user snapshot serialization: {e}")))?;

    store.write(ACCESS_TOKEN_KEY, access_token, short_expiry)?;
    store.write(REFRESH_TOKEN_KEY, refresh_token, refresh_expiry)?;
    store.write(USER_KEY, &user_json, short_expiry)?;
    Ok(())
}

/// Remove every credential entry from the jar.
///
/// # Errors
///
/// Returns [`PlatformError::CredentialStore`] if the jar cannot be
/// written.
pub fn purge_credentials(store: &dyn CredentialStore) -> Result<()> {
    store.remove(ACCESS_TOKEN_KEY)?;
    store.remove(REFRESH_TOKEN_KEY)?;
    store.remove(USER_KEY)?;
    Ok(())
}
