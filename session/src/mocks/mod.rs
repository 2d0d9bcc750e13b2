//! Mock provider implementations for testing.
//!
//! In-memory [`AuthApi`](crate::providers::AuthApi) stand-in with
//! programmable outcomes and a call recorder, for use in unit and
//! integration tests.

pub mod auth_api;

pub use auth_api::{AuthCall, MockAuthApi};
