//! Booking environment.
//!
//! Dependency injection for the booking reducers: the two API surfaces,
//! the external payment widget, a clock for draft validation, plus the
//! platform-side effects every flow touches.

use crate::providers::{BookingApi, PaymentApi, PaymentWidget};
use std::sync::Arc;
use wheelbase_core::environment::Clock;
use wheelbase_platform::{Navigator, Notifier};

/// Booking environment.
///
/// Contains all external dependencies needed by booking reducers.
///
/// # Type Parameters
///
/// - `B`: Booking API
/// - `P`: Payment API
/// - `W`: Payment widget
#[derive(Clone)]
pub struct BookingEnvironment<B, P, W>
where
    B: BookingApi + Clone,
    P: PaymentApi + Clone,
    W: PaymentWidget + Clone,
{
    /// Booking API.
    pub booking_api: B,

    /// Payment API.
    pub payment_api: P,

    /// External payment-collection widget.
    pub widget: W,

    /// Clock used by draft validation (pickup lead time, renter age).
    pub clock: Arc<dyn Clock>,

    /// Route navigation.
    pub navigator: Arc<dyn Navigator>,

    /// User-facing notifications (toasts).
    pub notifier: Arc<dyn Notifier>,
}

impl<B, P, W> BookingEnvironment<B, P, W>
where
    B: BookingApi + Clone,
    P: PaymentApi + Clone,
    W: PaymentWidget + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub fn new(
        booking_api: B,
        payment_api: P,
        widget: W,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            booking_api,
            payment_api,
            widget,
            clock,
            navigator,
            notifier,
        }
    }
}
