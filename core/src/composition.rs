//! Reducer composition utilities
//!
//! Feature crates split their logic across several focused reducers that
//! share one state and action type (session lifecycle, bootstrap, sign-in,
//! and so on). This module provides the glue:
//!
//! - **`combine_reducers`**: run multiple reducers on the same state/action
//! - **`scope_reducer`**: focus a reducer on a subset of a larger state

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer runs in sequence against the same mutable state; all effects
/// are collected and concatenated. Reducers are expected to ignore actions
/// that are not theirs, so at most one of them typically produces effects for
/// a given action.
///
/// The combined reducer is `Clone` (reducers are shared behind `Arc`), so it
/// satisfies the runtime store's reducer bounds.
///
/// # Examples
///
/// ```ignore
/// use wheelbase_core::composition::combine_reducers;
///
/// let session = combine_reducers(vec![
///     Arc::new(LifecycleReducer::new()),
///     Arc::new(BootstrapReducer::new(config.clone())),
///     Arc::new(SignInReducer::new(config)),
/// ]);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// This allows a reducer written against a feature state to participate in an
/// application-level state that embeds it.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<(A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut sub_state = (self.get_state)(state).clone();

        let effects = self.reducer.reduce(&mut sub_state, action, env);

        (self.set_state)(state, sub_state);

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.counter += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.counter -= 1;
                    smallvec![Effect::None]
                },
                TestAction::SetName(_) => smallvec![Effect::None],
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn combined_reducers_each_handle_their_actions() {
        let combined = combine_reducers(vec![Arc::new(CounterReducer), Arc::new(NameReducer)]);

        let mut state = TestState::default();

        let _ = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);

        let _ = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");

        let _ = combined.reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
    }

    #[derive(Clone, Default)]
    struct SubState {
        value: i32,
    }

    #[derive(Clone)]
    enum SubAction {
        Add(i32),
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SubAction::Add(n) => {
                    state.value += n;
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        sub: SubState,
        other: String,
    }

    #[test]
    fn scoped_reducer_only_touches_its_slice() {
        let scoped = scope_reducer(
            SubReducer,
            |parent: &ParentState| &parent.sub,
            |parent: &mut ParentState, sub: SubState| {
                parent.sub = sub;
            },
        );

        let mut state = ParentState {
            sub: SubState { value: 5 },
            other: "untouched".to_string(),
        };

        let _ = scoped.reduce(&mut state, SubAction::Add(3), &());
        assert_eq!(state.sub.value, 8);
        assert_eq!(state.other, "untouched");
    }
}
