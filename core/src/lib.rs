//! # Wheelbase Core
//!
//! Core traits and types for the Wheelbase client architecture.
//!
//! This crate provides the fundamental abstractions for building the
//! client-side state containers of the rental platform using the Reducer
//! pattern: a closed set of actions per feature, pure state transitions, and
//! side effects expressed as values.
//!
//! ## Core Concepts
//!
//! - **State**: domain state for a feature (session, bookings)
//! - **Action**: all possible inputs to a reducer (commands and events)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional data flow
//! - Explicit effects (no hidden I/O)
//! - Dependency injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use wheelbase_core::{Effect, Reducer, SmallVec, smallvec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 smallvec![Effect::None]
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod composition;

/// Reducer module - the core trait for feature logic
///
/// Reducers are pure functions: `(State, Action, Environment) → Effects`.
/// They contain all state-transition logic and are deterministic and
/// testable without a runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for feature logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: the domain state this reducer operates on
    /// - `Action`: the action type this reducer processes
    /// - `Environment`: the injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for SessionReducer {
    ///     type State = SessionState;
    ///     type Action = SessionAction;
    ///     type Environment = SessionEnvironment<A, C, N, T>;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut SessionState,
    ///         action: SessionAction,
    ///         env: &Self::Environment,
    ///     ) -> SmallVec<[Effect<SessionAction>; 4]> {
    ///         match action {
    ///             SessionAction::Logout => {
    ///                 state.clear();
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action against current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the runtime
        ///
        /// # Arguments
        ///
        /// - `state`: mutable reference to current state
        /// - `action`: the action to process
        /// - `env`: reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects describe side effects to be performed by the runtime store.
/// They are values (not execution) and can be combined in parallel or
/// in sequence.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the runtime
    /// store.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap an async computation that may feed an action back
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[derive(Debug, Clone, PartialEq, Eq)]
        enum TestAction {
            Ping,
        }

        #[test]
        fn merge_wraps_in_parallel() {
            let effect: Effect<TestAction> = Effect::merge(vec![Effect::None, Effect::None]);
            assert!(matches!(effect, Effect::Parallel(ref inner) if inner.len() == 2));
        }

        #[test]
        fn chain_wraps_in_sequential() {
            let effect: Effect<TestAction> = Effect::chain(vec![Effect::None]);
            assert!(matches!(effect, Effect::Sequential(ref inner) if inner.len() == 1));
        }

        #[test]
        #[allow(clippy::panic)] // Test assertion
        fn future_effect_resolves_to_action() {
            let effect = Effect::future(async { Some(TestAction::Ping) });
            let Effect::Future(fut) = effect else {
                panic!("expected a future effect");
            };
            assert_eq!(tokio_test::block_on(fut), Some(TestAction::Ping));
        }

        #[test]
        fn debug_formats_future_opaquely() {
            let effect: Effect<TestAction> = Effect::future(async { None });
            assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter of a reducer.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// Production code injects [`SystemClock`]; tests inject a fixed clock so
    /// time-dependent validation is deterministic.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// System clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

pub use effect::Effect;
pub use environment::{Clock, SystemClock};
pub use reducer::Reducer;
