//! Mock payment API for testing.

use super::{FailureMode, gateway_id};
use crate::error::{BookingError, Result};
use crate::models::{BookingStatus, Invoice, PaymentConfirmation, PaymentOrder, PaymentStatus};
use crate::providers::{PaymentApi, VerifiedPayment};
use std::sync::{Arc, Mutex};

/// One recorded API call, oldest first in [`MockPaymentApi::calls`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentCall {
    /// Order creation.
    CreateOrder {
        /// Rupee amount as submitted.
        amount: f64,
    },
    /// Proof verification.
    VerifyPayment {
        /// Booking the proof is for.
        booking_id: String,
        /// Gateway order id from the proof.
        order_id: String,
    },
}

#[derive(Debug, Default)]
struct Inner {
    order: Option<PaymentOrder>,
    verified: Option<VerifiedPayment>,
    reject_verification: bool,
    verify_failure: Option<FailureMode>,
    failure: Option<FailureMode>,
    calls: Vec<PaymentCall>,
}

/// Mock payment API.
///
/// Succeeds by default: orders carry a generated gateway id and the
/// amount converted to minor units, and verification hands back a
/// confirmed stock booking with an invoice. Outcomes are programmable
/// per instance. Clones share state.
///
/// **WARNING**: Do NOT use in production. This is for testing only!
#[derive(Clone, Default)]
pub struct MockPaymentApi {
    inner: Arc<Mutex<Inner>>,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Rupee totals are small and positive
fn minor_units(amount: f64) -> u64 {
    (amount * 100.0).round() as u64
}

/// Stock verification result: the booking confirmed and settled, with a
/// fresh handoff code and an invoice.
fn stock_verified(booking_id: &str) -> VerifiedPayment {
    use rand::Rng;

    let mut booking = super::stock_booking(booking_id);
    booking.status = BookingStatus::Confirm;
    booking.payment_status = PaymentStatus::Success;
    booking.customer_otp = format!("{:04}", rand::thread_rng().gen_range(0..10_000u32));
    VerifiedPayment {
        booking,
        invoice: Some(Invoice {
            invoice_id: Some(gateway_id("INV")),
            invoice_url: None,
            invoice_date: None,
        }),
    }
}

impl MockPaymentApi {
    /// Create a mock that succeeds with generated outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the order returned by order creation.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_order(self, order: PaymentOrder) -> Self {
        self.inner.lock().unwrap().order = Some(order);
        self
    }

    /// Program the booking and invoice returned by verification.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_verified(self, booking: crate::models::Booking, invoice: Option<Invoice>) -> Self {
        self.inner.lock().unwrap().verified = Some(VerifiedPayment { booking, invoice });
        self
    }

    /// Make verification answer without a success status, as the server
    /// does when the gateway signature fails its check.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn rejecting_verification(self) -> Self {
        self.inner.lock().unwrap().reject_verification = true;
        self
    }

    /// Make verification fail with a server rejection carrying `message`,
    /// while order creation keeps succeeding.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn failing_verification_with(self, message: &str) -> Self {
        self.inner.lock().unwrap().verify_failure = Some(FailureMode::Api(message.to_string()));
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
    pub fn calls(&self) -> Vec<PaymentCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of order creations.
    #[must_use]
    pub fn order_calls(&self) -> usize {
        self.count(|call| matches!(call, PaymentCall::CreateOrder { .. }))
    }

    /// Number of verification calls.
    #[must_use]
    pub fn verify_calls(&self) -> usize {
        self.count(|call| matches!(call, PaymentCall::VerifyPayment { .. }))
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn count(&self, predicate: impl Fn(&PaymentCall) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    fn record(&self, call: PaymentCall) -> Option<FailureMode> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner.failure.clone()
    }

    fn check(&self, call: PaymentCall) -> Result<()> {
        match self.record(call) {
            None => Ok(()),
            Some(failure) => Err(failure.into_error()),
        }
    }
}

impl PaymentApi for MockPaymentApi {
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn create_order(&self, amount: f64) -> Result<PaymentOrder> {
        self.check(PaymentCall::CreateOrder { amount })?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .order
            .clone()
            .unwrap_or_else(|| PaymentOrder {
                id: gateway_id("order"),
                amount: minor_units(amount),
                currency: "INR".to_string(),
            }))
    }

    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn verify_payment(
        &self,
        booking_id: &str,
        confirmation: &PaymentConfirmation,
    ) -> Result<VerifiedPayment> {
        self.check(PaymentCall::VerifyPayment {
            booking_id: booking_id.to_string(),
            order_id: confirmation.order_id.clone(),
        })?;
        let inner = self.inner.lock().unwrap();
        if let Some(failure) = inner.verify_failure.clone() {
            return Err(failure.into_error());
        }
        if inner.reject_verification {
            return Err(BookingError::VerificationRejected);
        }
        Ok(inner
            .verified
            .clone()
            .unwrap_or_else(|| stock_verified(booking_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmation() -> PaymentConfirmation {
        PaymentConfirmation {
            order_id: "order_test1".to_string(),
            payment_id: "pay_test1".to_string(),
            signature: "sig".to_string(),
        }
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn default_order_converts_the_amount_to_minor_units() {
        let api = MockPaymentApi::new();

        let order = api
            .create_order(5964.0)
            .await
            .expect("default mock should succeed");

        assert!(order.id.starts_with("order_"));
        assert_eq!(order.amount, 596_400);
        assert_eq!(order.currency, "INR");
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn default_verification_confirms_the_booking() {
        let api = MockPaymentApi::new();

        let verified = api
            .verify_payment("b-1", &confirmation())
            .await
            .expect("default mock should succeed");

        assert_eq!(verified.booking.id, "b-1");
        assert_eq!(verified.booking.status, BookingStatus::Confirm);
        assert_eq!(verified.booking.payment_status, PaymentStatus::Success);
        assert_eq!(verified.booking.customer_otp.len(), 4);
        assert!(verified.invoice.is_some());
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn programmed_rejection_reads_as_a_verification_rejection() {
        let api = MockPaymentApi::new().rejecting_verification();

        let error = api
            .verify_payment("b-1", &confirmation())
            .await
            .expect_err("rejection should surface as an error");

        assert_eq!(error, BookingError::VerificationRejected);
        assert_eq!(api.verify_calls(), 1);
    }

    #[tokio::test]
    async fn recorder_keeps_the_submitted_order_id() {
        let api = MockPaymentApi::new();

        let _ = api.verify_payment("b-1", &confirmation()).await;

        assert_eq!(
            api.calls(),
            vec![PaymentCall::VerifyPayment {
                booking_id: "b-1".to_string(),
                order_id: "order_test1".to_string(),
            }]
        );
    }
}
