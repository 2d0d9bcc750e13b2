//! Booking reducers.
//!
//! This module contains pure reducer functions for the booking store.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.

pub mod catalog;
pub mod lifecycle;

use crate::actions::BookingAction;
use crate::config::BookingConfig;
use crate::environment::BookingEnvironment;
use crate::providers::{BookingApi, PaymentApi, PaymentWidget};
use crate::state::BookingState;
use wheelbase_core::{SmallVec, effect::Effect, reducer::Reducer};

// Re-export
pub use catalog::CatalogReducer;
pub use lifecycle::LifecycleReducer;

/// Unified booking reducer.
///
/// Combines the lifecycle (creation, payment, cancellation) and catalog
/// (lists, details) flows into a single reducer. Routes actions to the
/// appropriate sub-reducer based on action type.
#[derive(Clone, Debug)]
pub struct BookingReducer<B, P, W>
where
    B: BookingApi + Clone + 'static,
    P: PaymentApi + Clone + 'static,
    W: PaymentWidget + Clone + 'static,
{
    lifecycle: LifecycleReducer<B, P, W>,
    catalog: CatalogReducer<B, P, W>,
}

impl<B, P, W> BookingReducer<B, P, W>
where
    B: BookingApi + Clone + 'static,
    P: PaymentApi + Clone + 'static,
    W: PaymentWidget + Clone + 'static,
{
    /// Create a unified booking reducer with the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(BookingConfig::new())
    }

    /// Create a unified booking reducer with a custom policy.
    #[must_use]
    pub const fn with_config(config: BookingConfig) -> Self {
        Self {
            lifecycle: LifecycleReducer::with_config(config),
            catalog: CatalogReducer::new(),
        }
    }
}

impl<B, P, W> Default for BookingReducer<B, P, W>
where
    B: BookingApi + Clone + 'static,
    P: PaymentApi + Clone + 'static,
    W: PaymentWidget + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B, P, W> Reducer for BookingReducer<B, P, W>
where
    B: BookingApi + Clone + 'static,
    P: PaymentApi + Clone + 'static,
    W: PaymentWidget + Clone + 'static,
{
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment<B, P, W>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Route to the appropriate sub-reducer based on action type
        match action {
            // Creation, payment saga, cancellation
            BookingAction::DraftSubmitted { .. }
            | BookingAction::BookingCreated { .. }
            | BookingAction::BookingCreationFailed { .. }
            | BookingAction::PaymentRequested { .. }
            | BookingAction::PaymentOrderOpened { .. }
            | BookingAction::PaymentConfirmed { .. }
            | BookingAction::PaymentWidgetDismissed { .. }
            | BookingAction::PaymentWidgetTimedOut { .. }
            | BookingAction::PaymentFlowFailed { .. }
            | BookingAction::PaymentVerified { .. }
            | BookingAction::PaymentVerificationFailed { .. }
            | BookingAction::CancellationRequested { .. }
            | BookingAction::BookingCancelled { .. }
            | BookingAction::CancellationFailed { .. } => {
                self.lifecycle.reduce(state, action, env)
            }

            // Lists and details
            BookingAction::AllBookingsRequested
            | BookingAction::AllBookingsLoaded { .. }
            | BookingAction::UserBookingsRequested { .. }
            | BookingAction::UserBookingsLoaded { .. }
            | BookingAction::BookingDetailRequested { .. }
            | BookingAction::BookingDetailLoaded { .. }
            | BookingAction::BookingsLoadFailed { .. }
            | BookingAction::SelectedBookingCleared => self.catalog.reduce(state, action, env),
        }
    }
}
