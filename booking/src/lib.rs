//! # Wheelbase Booking
//!
//! Booking lifecycle, payment flow, and booking catalog for the
//! Wheelbase client.
//!
//! The booking store is single-owner: [`BookingState`] is mutated only by
//! [`BookingAction`]s flowing through the [`reducers`], and every outside
//! interaction (the booking API, the payment gateway, the widget,
//! navigation, toasts) is an [`Effect`](wheelbase_core::Effect) executed
//! by the runtime.
//!
//! ## Flows
//!
//! - **Creation**: local draft validation (renter details, rental
//!   window, age) first; only a clean draft reaches POST `/booking`
//! - **Payment**: order creation, the external widget under a bounded
//!   timeout, then server-side verification of the proof triple; every
//!   event is stamped with an attempt number so abandoned attempts
//!   cannot resurface
//! - **Cancellation**: refused locally unless the booking is confirmed;
//!   the cached copy is patched only after the server agrees
//! - **Catalog**: paged and per-account lists plus detail fetches, with
//!   failures rendered inline rather than toasted
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wheelbase_booking::mocks::{MockBookingApi, MockPaymentApi, MockPaymentWidget};
//! use wheelbase_booking::reducers::BookingReducer;
//! use wheelbase_booking::{BookingAction, BookingEnvironment, BookingState};
//! use wheelbase_core::reducer::Reducer;
//! use wheelbase_platform::mocks::{MockNavigator, MockNotifier};
//! use wheelbase_testing::test_clock;
//!
//! let reducer = BookingReducer::new();
//! let env = BookingEnvironment::new(
//!     MockBookingApi::new(),
//!     MockPaymentApi::new(),
//!     MockPaymentWidget::new(),
//!     Arc::new(test_clock()),
//!     Arc::new(MockNavigator::new()),
//!     Arc::new(MockNotifier::new()),
//! );
//!
//! let mut state = BookingState::new();
//! let _effects = reducer.reduce(&mut state, BookingAction::AllBookingsRequested, &env);
//! assert!(state.load.is_loading());
//! ```

// Public modules
pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod models;
pub mod providers;
pub mod reducers;
pub mod state;
pub mod validation;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use actions::BookingAction;
pub use config::BookingConfig;
pub use environment::BookingEnvironment;
pub use error::{BookingError, Result};
pub use models::{
    Booking, BookingDraft, BookingPage, BookingStatus, Invoice, PaymentConfirmation, PaymentOrder,
    PaymentStatus, WidgetPrefill,
};
pub use providers::{BookingApi, PaymentApi, PaymentWidget, VerifiedPayment, WidgetOutcome};
pub use reducers::BookingReducer;
pub use state::{BookingState, LoadStatus, PaymentPhase};
