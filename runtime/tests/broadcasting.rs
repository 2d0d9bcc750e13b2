//! Integration tests for Store action broadcasting
//!
//! Tests the action observation features that let callers treat the store as
//! a request-response machine: send an intent action, wait for the terminal
//! action produced by its effects.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use wheelbase_core::composition::combine_reducers;
use wheelbase_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use wheelbase_runtime::Store;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
enum SyncAction {
    /// Start a multi-page sync with a correlation ID
    SyncRequested { id: u64 },
    /// One page of the sync landed
    PageSynced { id: u64, page: u32 },
    /// Sync finished (terminal action)
    SyncCompleted { id: u64 },
    /// Sync failed (terminal action)
    SyncFailed { id: u64, reason: String },
    /// Single-shot refresh command
    RefreshRequested,
    /// Refresh outcome event
    Refreshed { generation: u32 },
}

#[derive(Debug, Clone, Default)]
struct SyncState {
    generation: u32,
    synced_pages: Vec<u32>,
    actions_seen: u32,
}

#[derive(Clone)]
struct SyncEnvironment;

#[derive(Clone)]
struct SyncReducer;

impl Reducer for SyncReducer {
    type State = SyncState;
    type Action = SyncAction;
    type Environment = SyncEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SyncAction::SyncRequested { id } => {
                state.synced_pages.clear();
                smallvec![Effect::Future(Box::pin(async move {
                    // Simulate async work
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(SyncAction::PageSynced { id, page: 1 })
                }))]
            },

            SyncAction::PageSynced { id, page } => {
                state.synced_pages.push(page);

                if page < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(SyncAction::PageSynced { id, page: page + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(SyncAction::SyncCompleted { id })
                    }))]
                }
            },

            SyncAction::SyncCompleted { .. } | SyncAction::SyncFailed { .. } => {
                // Terminal actions, no effects
                smallvec![Effect::None]
            },

            SyncAction::RefreshRequested => {
                state.generation += 1;
                let generation = state.generation;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(SyncAction::Refreshed { generation })
                }))]
            },

            SyncAction::Refreshed { .. } => {
                smallvec![Effect::None]
            },
        }
    }
}

/// Counts every action that flows through the store, ignoring none.
///
/// Stands in for the cross-cutting reducers that feature stores layer over
/// their flow reducers with `combine_reducers`.
#[derive(Clone)]
struct AuditReducer;

impl Reducer for AuditReducer {
    type State = SyncState;
    type Action = SyncAction;
    type Environment = SyncEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        _action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        state.actions_seen += 1;
        smallvec![Effect::None]
    }
}

// ============================================================================
// Tests
// ============================================================================

/// Test `send_and_wait_for` with immediate response
#[tokio::test]
async fn test_send_and_wait_for_immediate() {
    let store = Store::new(SyncState::default(), SyncReducer, SyncEnvironment);

    let result = store
        .send_and_wait_for(
            SyncAction::RefreshRequested,
            |action| matches!(action, SyncAction::Refreshed { .. }),
            Duration::from_secs(1),
        )
        .await;

    assert!(result.is_ok());
    assert!(matches!(
        result.unwrap(),
        SyncAction::Refreshed { generation: 1 }
    ));
}

/// Test `send_and_wait_for` across a multi-step flow
///
/// The terminal action only arrives after three intermediate feedback
/// actions have been processed.
#[tokio::test]
async fn test_send_and_wait_for_multi_step() {
    let store = Store::new(SyncState::default(), SyncReducer, SyncEnvironment);

    let result = store
        .send_and_wait_for(
            SyncAction::SyncRequested { id: 42 },
            |action| matches!(action, SyncAction::SyncCompleted { id: 42 }),
            Duration::from_secs(1),
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), SyncAction::SyncCompleted { id: 42 });

    // All pages landed in order
    let pages = store.state(|s| s.synced_pages.clone()).await;
    assert_eq!(pages, vec![1, 2, 3]);
}

/// Test `send_and_wait_for` timeout behavior
#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = Store::new(SyncState::default(), SyncReducer, SyncEnvironment);

    let result = store
        .send_and_wait_for(
            SyncAction::SyncRequested { id: 99 },
            |action| {
                // Wait for an action that will never come
                matches!(action, SyncAction::SyncFailed { id: 99, .. })
            },
            Duration::from_millis(50),
        )
        .await;

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        wheelbase_runtime::StoreError::Timeout
    ));
}

/// Test concurrent waiters
///
/// Multiple callers can independently wait for different terminal actions
/// without interfering with each other.
#[tokio::test]
async fn test_concurrent_waiters() {
    let store = Arc::new(Store::new(
        SyncState::default(),
        SyncReducer,
        SyncEnvironment,
    ));

    let mut handles = vec![];

    for id in 1..=5 {
        let store_clone = Arc::clone(&store);
        let handle = tokio::spawn(async move {
            store_clone
                .send_and_wait_for(
                    SyncAction::SyncRequested { id },
                    move |action| {
                        matches!(action, SyncAction::SyncCompleted { id: done } if *done == id)
                    },
                    Duration::from_secs(2),
                )
                .await
        });
        handles.push(handle);
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.expect("Task panicked");
        assert!(result.is_ok(), "Sync {} should complete", i + 1);
    }

    // Syncs may interleave but all of them ran to completion
    let pages = store.state(|s| s.synced_pages.clone()).await;
    assert_eq!(pages.len(), 15, "Expected 15 total pages from 5 syncs");
}

/// Test `subscribe_actions` streaming
///
/// Subscribers receive every action produced by effects, in order.
#[tokio::test]
async fn test_subscribe_actions_streaming() {
    let store = Arc::new(Store::new(
        SyncState::default(),
        SyncReducer,
        SyncEnvironment,
    ));

    let mut rx = store.subscribe_actions();

    // Collect actions in background task
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = Arc::clone(&received);

    tokio::spawn(async move {
        let mut count = 0;
        while count < 4 {
            // Expect 4 actions: PageSynced(1,2,3), SyncCompleted
            if let Ok(action) = rx.recv().await {
                received_clone.lock().await.push(action);
                count += 1;
            }
        }
    });

    // Give subscriber time to set up
    tokio::time::sleep(Duration::from_millis(10)).await;

    store.send(SyncAction::SyncRequested { id: 100 }).await.ok();

    // Wait for the sync to complete
    tokio::time::sleep(Duration::from_millis(100)).await;

    let actions = received.lock().await;
    assert_eq!(actions.len(), 4);
    assert!(matches!(
        actions[0],
        SyncAction::PageSynced { id: 100, page: 1 }
    ));
    assert!(matches!(
        actions[1],
        SyncAction::PageSynced { id: 100, page: 2 }
    ));
    assert!(matches!(
        actions[2],
        SyncAction::PageSynced { id: 100, page: 3 }
    ));
    assert!(matches!(actions[3], SyncAction::SyncCompleted { id: 100 }));
}

/// Test custom broadcast capacity
///
/// A small buffer drops actions for subscribers that fall behind instead of
/// blocking the store.
#[tokio::test]
async fn test_custom_broadcast_capacity() {
    let store = Arc::new(Store::with_broadcast_capacity(
        SyncState::default(),
        SyncReducer,
        SyncEnvironment,
        2, // Very small capacity
    ));

    let mut rx = store.subscribe_actions();

    // Send more refreshes than the buffer holds, without draining
    for _ in 0..5 {
        store.send(SyncAction::RefreshRequested).await.ok();
    }

    // Give effects time to execute
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut received = 0;
    let mut lagged = false;

    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => {
                lagged = true;
            },
            Err(_) => break,
        }
    }

    assert!(
        lagged || received < 5,
        "Should lag or miss actions with a capacity-2 buffer"
    );
}

/// Test a store driven by a combined reducer
///
/// Two reducers share the state: one runs the flow, the other observes every
/// action. Both must see each action the store processes, including feedback
/// actions produced by effects.
#[tokio::test]
async fn test_store_over_combined_reducer() {
    let combined = combine_reducers(vec![Arc::new(SyncReducer), Arc::new(AuditReducer)]);
    let store = Store::new(SyncState::default(), combined, SyncEnvironment);

    let result = store
        .send_and_wait_for(
            SyncAction::RefreshRequested,
            |action| matches!(action, SyncAction::Refreshed { .. }),
            Duration::from_secs(1),
        )
        .await;
    assert!(result.is_ok());

    // The terminal action is broadcast just before its own reduction; give
    // the store a moment to fold it in.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (generation, actions_seen) = store.state(|s| (s.generation, s.actions_seen)).await;
    assert_eq!(generation, 1);
    assert_eq!(actions_seen, 2, "RefreshRequested and Refreshed");
}
