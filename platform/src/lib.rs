//! # Wheelbase Platform
//!
//! Host-platform ports and the HTTP adapter for the Wheelbase client.
//!
//! The feature crates (`wheelbase-session`, `wheelbase-booking`) never talk
//! to the outside world directly. Everything crosses one of the ports
//! defined here:
//!
//! - [`CredentialStore`]: the durable credential jar (cookies, keychain)
//! - [`Navigator`]: route transitions, plus the hard sign-in redirect
//! - [`Notifier`]: user-facing notifications
//! - [`http::ApiClient`]: the single HTTP chokepoint, owner of the global
//!   authorization-denied policy (credential purge + forced redirect)
//!
//! Alongside the ports live the shared vocabulary types ([`Route`],
//! [`Role`], [`UserProfile`]), the [`endpoints`] path map, and the server's
//! response [`Envelope`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wheelbase_platform::http::{ApiClient, ApiConfig};
//! use wheelbase_platform::mocks::{MockCredentialStore, MockNavigator};
//!
//! # fn main() -> wheelbase_platform::Result<()> {
//! let client = ApiClient::new(
//!     ApiConfig::from_env(),
//!     Arc::new(MockCredentialStore::new()),
//!     Arc::new(MockNavigator::new()),
//! )?;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod credentials;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod http;
pub mod identity;
pub mod navigation;
pub mod notify;
pub mod routes;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use credentials::{
    CredentialStore, Expiry, StoredCredentials, load_credentials, persist_credentials,
    purge_credentials,
};
pub use envelope::Envelope;
pub use error::{PlatformError, Result};
pub use forms::{FieldError, FieldErrors};
pub use identity::{Role, UserId, UserProfile};
pub use navigation::Navigator;
pub use notify::{NotificationLevel, Notifier};
pub use routes::Route;
