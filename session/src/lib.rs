//! # Wheelbase Session
//!
//! Session store, authentication flows, and route guards for the
//! Wheelbase client.
//!
//! The session is a single-owner store: [`SessionState`] is mutated only by
//! [`SessionAction`]s flowing through the [`reducers`], and every outside
//! interaction (the auth API, the credential jar, navigation, toasts) is
//! an [`Effect`](wheelbase_core::Effect) executed by the runtime.
//!
//! ## Flows
//!
//! - **Bootstrap**: restore a persisted session at startup, refreshing
//!   over the network when only a refresh token survived; latches
//!   `is_initialized` exactly once on every path
//! - **Sign-in / sign-up / verification / recovery / sign-out**: local
//!   validation first, then the credential exchange, jar synchronization,
//!   notification, and navigation
//! - **Guards** ([`guards`]): pure route-authorization decisions over a
//!   state snapshot
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wheelbase_core::reducer::Reducer;
//! use wheelbase_platform::mocks::{MockCredentialStore, MockNavigator, MockNotifier};
//! use wheelbase_session::mocks::MockAuthApi;
//! use wheelbase_session::reducers::SessionReducer;
//! use wheelbase_session::{SessionAction, SessionEnvironment, SessionState};
//!
//! let reducer = SessionReducer::new();
//! let env = SessionEnvironment::new(
//!     MockAuthApi::new(),
//!     Arc::new(MockCredentialStore::new()),
//!     Arc::new(MockNavigator::new()),
//!     Arc::new(MockNotifier::new()),
//! );
//!
//! let mut state = SessionState::new();
//! let _effects = reducer.reduce(&mut state, SessionAction::BootstrapRequested, &env);
//! assert!(state.bootstrap.is_pending());
//! ```

// Public modules
pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod guards;
pub mod providers;
pub mod reducers;
pub mod state;
pub mod validation;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use actions::{RestoredAuth, SessionAction, SignUpForm};
pub use config::SessionConfig;
pub use environment::SessionEnvironment;
pub use error::{Result, SessionError};
pub use guards::GuardDecision;
pub use providers::{AuthApi, AuthGrant, SignUpReceipt, SignUpRequest};
pub use reducers::SessionReducer;
pub use state::{FieldError, FieldErrors, FlowStatus, SessionState};
