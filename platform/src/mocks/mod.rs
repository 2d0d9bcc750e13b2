//! Mock port implementations for testing.
//!
//! This module provides simple, in-memory implementations of all platform
//! ports for use in unit and integration tests. Each mock records the calls
//! it receives so tests can assert on behavior, not just outcomes.

pub mod credential_store;
pub mod navigator;
pub mod notifier;

pub use credential_store::MockCredentialStore;
pub use navigator::{MockNavigator, NavigationCall};
pub use notifier::MockNotifier;
