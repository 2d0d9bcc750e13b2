//! # Wheelbase Testing
//!
//! Testing utilities and helpers for the Wheelbase client architecture.
//!
//! This crate provides:
//! - A fluent Given-When-Then builder for reducer tests
//! - Assertion helpers for effect lists
//! - Deterministic mocks for environment traits
//!
//! ## Example
//!
//! ```ignore
//! use wheelbase_testing::{ReducerTest, assertions, test_clock};
//!
//! #[test]
//! fn logout_clears_session() {
//!     ReducerTest::new(LifecycleReducer)
//!         .with_env(test_environment())
//!         .given_state(signed_in_state())
//!         .when_action(SessionAction::Logout)
//!         .then_state(|state| {
//!             assert!(!state.is_authenticated);
//!         })
//!         .then_effects(assertions::assert_no_effects)
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use wheelbase_core::environment::Clock;

/// Ergonomic testing utilities for reducers
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use wheelbase_testing::mocks::FixedClock;
    /// use wheelbase_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
