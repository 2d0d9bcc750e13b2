//! Mock booking API for testing.

use super::FailureMode;
use crate::error::Result;
use crate::models::{Booking, BookingDraft, BookingPage};
use crate::providers::BookingApi;
use std::sync::{Arc, Mutex};

/// One recorded API call, oldest first in [`MockBookingApi::calls`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingCall {
    /// Draft submission.
    CreateBooking {
        /// Car the draft reserved.
        car_id: String,
    },
    /// Detail fetch.
    Booking {
        /// Record id requested.
        id: String,
    },
    /// Paged list fetch.
    AllBookings,
    /// Per-account list fetch.
    UserBookings {
        /// Account id requested.
        user_id: String,
    },
    /// Cancellation patch.
    CancelBooking {
        /// Record id cancelled.
        id: String,
        /// Reason as submitted.
        reason: String,
    },
}

#[derive(Debug, Default)]
struct Inner {
    booking: Option<Booking>,
    page: Option<BookingPage>,
    user_bookings: Option<Vec<Booking>>,
    failure: Option<FailureMode>,
    calls: Vec<BookingCall>,
}

/// Mock booking API.
///
/// Succeeds by default: create synthesizes a `PENDING` booking from the
/// draft, detail and list calls hand out stock bookings. Outcomes are
/// programmable per instance. Clones share state.
///
/// **WARNING**: Do NOT use in production. This is for testing only!
#[derive(Clone, Default)]
pub struct MockBookingApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockBookingApi {
    /// Create a mock that succeeds with synthesized bookings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the booking returned by create and detail calls.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_booking(self, booking: Booking) -> Self {
        self.inner.lock().unwrap().booking = Some(booking);
        self
    }

    /// Program the page returned by the paged list call.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_page(self, page: BookingPage) -> Self {
        self.inner.lock().unwrap().page = Some(page);
        self
    }

    /// Program the bookings returned by the per-account list call.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_user_bookings(self, bookings: Vec<Booking>) -> Self {
        self.inner.lock().unwrap().user_bookings = Some(bookings);
        self
    }

    /// Make every call fail with a server rejection carrying `message`.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn failing_with(self, message: &str) -> Self {
        self.inner.lock().unwrap().failure = Some(FailureMode::Api(message.to_string()));
        self
    }

    /// Make every call fail as an authorization denial (the state after
    /// the adapter's global 401 handling has run).
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn denying(self) -> Self {
        self.inner.lock().unwrap().failure = Some(FailureMode::Denied);
        self
    }

    /// Every call recorded so far, oldest first.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn calls(&self) -> Vec<BookingCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of draft submissions.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.count(|call| matches!(call, BookingCall::CreateBooking { .. }))
    }

    /// Number of cancellation patches.
    #[must_use]
    pub fn cancel_calls(&self) -> usize {
        self.count(|call| matches!(call, BookingCall::CancelBooking { .. }))
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn count(&self, predicate: impl Fn(&BookingCall) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn record(&self, call: BookingCall) -> Option<FailureMode> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner.failure.clone()
    }

    fn check(&self, call: BookingCall) -> Result<()> {
        match self.record(call) {
            None => Ok(()),
            Some(failure) => Err(failure.into_error()),
        }
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn programmed_booking(&self) -> Option<Booking> {
        self.inner.lock().unwrap().booking.clone()
    }
}

impl BookingApi for MockBookingApi {
    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking> {
        self.check(BookingCall::CreateBooking {
            car_id: draft.car_id.clone(),
        })?;
        if let Some(programmed) = self.programmed_booking() {
            return Ok(programmed);
        }
        let mut booking = super::stock_booking(&uuid::Uuid::new_v4().to_string());
        booking.booking_name = draft.booking_name.clone();
        booking.email = draft.email.clone();
        booking.contact = draft.contact.clone();
        booking.license_no = draft.license_no.clone();
        booking.dob = draft.dob;
        booking.pickup_dt = draft.pickup_dt;
        booking.dropoff_dt = draft.dropoff_dt;
        booking.pickup_location = draft.pickup_location.clone();
        booking.dropoff_location = draft.dropoff_location.clone();
        Ok(booking)
    }

    async fn booking(&self, id: &str) -> Result<Booking> {
        self.check(BookingCall::Booking { id: id.to_string() })?;
        Ok(self
            .programmed_booking()
            .unwrap_or_else(|| super::stock_booking(id)))
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn all_bookings(&self) -> Result<BookingPage> {
        self.check(BookingCall::AllBookings)?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .page
            .clone()
            .unwrap_or_else(|| BookingPage {
                data: vec![super::stock_booking("b-mock-1")],
                page: 1,
                total: 1,
                limit: 10,
            }))
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        self.check(BookingCall::UserBookings {
            user_id: user_id.to_string(),
        })?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .user_bookings
            .clone()
            .unwrap_or_else(|| vec![super::stock_booking("b-mock-1")]))
    }

    async fn cancel_booking(&self, id: &str, reason: &str) -> Result<()> {
        self.check(BookingCall::CancelBooking {
            id: id.to_string(),
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::NaiveDate;

    fn draft() -> BookingDraft {
        BookingDraft {
            car_id: "car-1".to_string(),
            booking_name: "Asha Rao".to_string(),
            email: Some("asha@example.com".to_string()),
            contact: "+91 98765 43210".to_string(),
            license_no: "KA01 2026 0001".to_string(),
            dob: NaiveDate::from_ymd_opt(1994, 3, 12).unwrap_or_default(),
            pickup_dt: super::super::timestamp("2026-09-01T10:00:00Z"),
            dropoff_dt: super::super::timestamp("2026-09-03T10:00:00Z"),
            pickup_location: "Indiranagar".to_string(),
            dropoff_location: "Whitefield".to_string(),
        }
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn default_mock_synthesizes_a_pending_booking_from_the_draft() {
        let api = MockBookingApi::new();

        let booking = api
            .create_booking(&draft())
            .await
            .expect("default mock should succeed");

        assert_eq!(booking.booking_name, "Asha Rao");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(!booking.id.is_empty());
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn programmed_failure_applies_to_every_call() {
        let api = MockBookingApi::new().failing_with("nope");

        assert!(api.all_bookings().await.is_err());
        assert!(api.cancel_booking("b-1", "changed plans").await.is_err());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn denial_reads_as_handled_globally() {
        let api = MockBookingApi::new().denying();

        let error = api
            .booking("b-1")
            .await
            .expect_err("denial should surface as an error");

        assert!(error.is_authorization_denied());
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn recorder_keeps_call_order() {
        let api = MockBookingApi::new();

        let _ = api.booking("b-9").await.expect("detail");
        api.cancel_booking("b-9", "changed plans")
            .await
            .expect("cancel");

        assert_eq!(
            api.calls(),
            vec![
                BookingCall::Booking {
                    id: "b-9".to_string()
                },
                BookingCall::CancelBooking {
                    id: "b-9".to_string(),
                    reason: "changed plans".to_string()
                },
            ]
        );
    }
}
