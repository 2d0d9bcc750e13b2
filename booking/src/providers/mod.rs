//! Booking and payment providers.
//!
//! The booking store touches the outside world through three ports:
//! [`BookingApi`] and [`PaymentApi`] cover the rental API, and
//! [`PaymentWidget`] wraps the external payment-collection UI the
//! application does not control. Reducers depend on the traits; the
//! [`http`] implementations ride the platform adapter in production, and
//! the [`mocks`](crate::mocks) drive tests at memory speed.

pub mod http;

use crate::error::Result;
use crate::models::{
    Booking, BookingDraft, BookingPage, Invoice, PaymentConfirmation, PaymentOrder, WidgetPrefill,
};

/// Payload of a successful payment verification: the booking as updated
/// by the server (CONFIRM, payment settled) plus the issued invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPayment {
    /// The updated booking.
    pub booking: Booking,
    /// Invoice for the payment, when the server issued one.
    pub invoice: Option<Invoice>,
}

/// How one widget invocation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// The shopper completed the gateway flow; the proof triple must be
    /// verified server-side before anything is considered paid.
    Confirmed(PaymentConfirmation),
    /// The shopper closed the widget without paying.
    Dismissed,
}

/// The booking endpoints of the rental API.
pub trait BookingApi: Send + Sync {
    /// Create a booking from a validated draft.
    ///
    /// POST `/booking`; the server computes all pricing and assigns
    /// `id`/`bookingId`/PENDING status.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Platform`](crate::BookingError::Platform)
    /// for server rejections and transport failures,
    /// [`BookingError::MissingPayload`](crate::BookingError::MissingPayload)
    /// if the envelope carries no booking.
    fn create_booking(
        &self,
        draft: &BookingDraft,
    ) -> impl std::future::Future<Output = Result<Booking>> + Send;

    /// Fetch one booking.
    ///
    /// GET `/booking/:id`, tolerating both the flat and the nested
    /// `data.data` body shapes the server has been seen to produce.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::create_booking`].
    fn booking(&self, id: &str) -> impl std::future::Future<Output = Result<Booking>> + Send;

    /// Fetch the full booking list with pagination counters.
    ///
    /// GET `/booking`. This endpoint answers with the page body directly,
    /// not the standard envelope.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Platform`](crate::BookingError::Platform)
    /// for server rejections and transport failures.
    fn all_bookings(&self) -> impl std::future::Future<Output = Result<BookingPage>> + Send;

    /// Fetch the bookings of one account.
    ///
    /// GET `/booking/user/:userId`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::create_booking`].
    fn user_bookings(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>>> + Send;

    /// Cancel a booking with a reason.
    ///
    /// PATCH `/booking/cancel/:id` with `{ reason }`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Platform`](crate::BookingError::Platform)
    /// for server rejections and transport failures.
    fn cancel_booking(
        &self,
        id: &str,
        reason: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The payment endpoints of the rental API.
pub trait PaymentApi: Send + Sync {
    /// Obtain a gateway order descriptor for `amount`.
    ///
    /// POST `/payment/create-order` with the server-computed booking
    /// total; the server converts to gateway minor units.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Platform`](crate::BookingError::Platform)
    /// for server rejections and transport failures,
    /// [`BookingError::MissingPayload`](crate::BookingError::MissingPayload)
    /// if the envelope carries no order.
    fn create_order(
        &self,
        amount: f64,
    ) -> impl std::future::Future<Output = Result<PaymentOrder>> + Send;

    /// Verify a widget callback server-side.
    ///
    /// POST `/payment/verify` with the booking id and the proof triple
    /// unmodified. Only this call can durably confirm a payment.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`BookingError::VerificationRejected`](crate::BookingError::VerificationRejected)
    /// when the server answered but did not mark the payment successful,
    /// [`BookingError::Platform`](crate::BookingError::Platform) for
    /// transport failures.
    fn verify_payment(
        &self,
        booking_id: &str,
        confirmation: &PaymentConfirmation,
    ) -> impl std::future::Future<Output = Result<VerifiedPayment>> + Send;
}

/// The external payment-collection widget.
///
/// Its internal protocol is opaque; the store hands it an order plus
/// prefill and suspends until it resolves. The reducer arms a separate
/// timeout, so an implementation that never resolves does not wedge the
/// flow.
pub trait PaymentWidget: Send + Sync {
    /// Present the widget for `order` and wait for the shopper.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Widget`](crate::BookingError::Widget) when
    /// the widget could not be presented at all (script load failure,
    /// gateway unreachable).
    fn collect(
        &self,
        order: &PaymentOrder,
        prefill: &WidgetPrefill,
    ) -> impl std::future::Future<Output = Result<WidgetOutcome>> + Send;
}
