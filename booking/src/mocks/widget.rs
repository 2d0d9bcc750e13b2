//! Mock payment widget for testing.

use super::gateway_id;
use crate::error::{BookingError, Result};
use crate::models::{PaymentConfirmation, PaymentOrder, WidgetPrefill};
use crate::providers::{PaymentWidget, WidgetOutcome};
use std::sync::{Arc, Mutex};

/// One recorded widget presentation, oldest first in
/// [`MockPaymentWidget::calls`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCall {
    /// Order the widget was opened for.
    pub order: PaymentOrder,
    /// Contact prefill handed over.
    pub prefill: WidgetPrefill,
}

/// What a presented widget does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WidgetScript {
    /// Resolve with a proof triple for the presented order.
    #[default]
    Confirm,
    /// Resolve as closed without paying.
    Dismiss,
    /// Fail to present, with this reason.
    Fail(String),
    /// Never resolve, leaving the reducer's timeout to fire.
    Hang,
}

#[derive(Debug, Default)]
struct Inner {
    script: WidgetScript,
    confirmation: Option<PaymentConfirmation>,
    calls: Vec<WidgetCall>,
}

/// Mock payment widget.
///
/// Confirms by default with a generated proof triple tied to the
/// presented order; the script is programmable per instance. Clones
/// share state.
///
/// **WARNING**: Do NOT use in production. This is for testing only!
#[derive(Clone, Default)]
pub struct MockPaymentWidget {
    inner: Arc<Mutex<Inner>>,
}

/// Proof triple a cooperative gateway would produce for this order.
fn generated_confirmation(order_id: &str) -> PaymentConfirmation {
    use rand::RngCore;

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    PaymentConfirmation {
        order_id: order_id.to_string(),
        payment_id: gateway_id("pay"),
        signature: bytes.iter().map(|b| format!("{b:02x}")).collect(),
    }
}

impl MockPaymentWidget {
    /// Create a mock that confirms with a generated proof triple.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the exact proof triple the widget resolves with.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn with_confirmation(self, confirmation: PaymentConfirmation) -> Self {
        self.inner.lock().unwrap().confirmation = Some(confirmation);
        self
    }

    /// Make the widget resolve with a proof triple again (the default
    /// script). Scripts are shared across clones, so reprogramming any
    /// handle reprograms them all.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn confirming(self) -> Self {
        self.inner.lock().unwrap().script = WidgetScript::Confirm;
        self
    }

    /// Make the widget resolve as closed without paying.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn dismissing(self) -> Self {
        self.inner.lock().unwrap().script = WidgetScript::Dismiss;
        self
    }

    /// Make the widget fail to present, with this reason.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn failing_with(self, reason: &str) -> Self {
        self.inner.lock().unwrap().script = WidgetScript::Fail(reason.to_string());
        self
    }

    /// Make the widget never resolve, so only the reducer's timeout can
    /// end the attempt.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn hanging(self) -> Self {
        self.inner.lock().unwrap().script = WidgetScript::Hang;
        self
    }

    /// Every presentation recorded so far, oldest first.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of presentations.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    pub fn collect_calls(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }
}

impl PaymentWidget for MockPaymentWidget {
    #[allow(clippy::unwrap_used)] // Test mock: mutex poisoning is a test failure
    async fn collect(
        &self,
        order: &PaymentOrder,
        prefill: &WidgetPrefill,
    ) -> Result<WidgetOutcome> {
        let (script, programmed) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(WidgetCall {
                order: order.clone(),
                prefill: prefill.clone(),
            });
            (inner.script.clone(), inner.confirmation.clone())
        };
        match script {
            WidgetScript::Confirm => Ok(WidgetOutcome::Confirmed(
                programmed.unwrap_or_else(|| generated_confirmation(&order.id)),
            )),
            WidgetScript::Dismiss => Ok(WidgetOutcome::Dismissed),
            WidgetScript::Fail(reason) => Err(BookingError::Widget(reason)),
            WidgetScript::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> PaymentOrder {
        PaymentOrder {
            id: "order_test1".to_string(),
            amount: 596_400,
            currency: "INR".to_string(),
        }
    }

    fn prefill() -> WidgetPrefill {
        WidgetPrefill {
            name: "Asha Rao".to_string(),
            email: Some("asha@example.com".to_string()),
            contact: "+91 98765 43210".to_string(),
        }
    }

    #[tokio::test]
    #[allow(clippy::expect_used, clippy::panic)] // Test assertion
    async fn default_widget_confirms_the_presented_order() {
        let widget = MockPaymentWidget::new();

        let outcome = widget
            .collect(&order(), &prefill())
            .await
            .expect("default widget should resolve");

        match outcome {
            WidgetOutcome::Confirmed(confirmation) => {
                assert_eq!(confirmation.order_id, "order_test1");
                assert!(confirmation.payment_id.starts_with("pay_"));
                assert_eq!(confirmation.signature.len(), 64);
            }
            WidgetOutcome::Dismissed => panic!("expected a confirmation"),
        }
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn dismissal_resolves_without_a_proof() {
        let widget = MockPaymentWidget::new().dismissing();

        let outcome = widget
            .collect(&order(), &prefill())
            .await
            .expect("dismissal is not an error");

        assert_eq!(outcome, WidgetOutcome::Dismissed);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)] // Test assertion
    async fn failure_surfaces_the_scripted_reason() {
        let widget = MockPaymentWidget::new().failing_with("Razorpay SDK failed to load.");

        let error = widget
            .collect(&order(), &prefill())
            .await
            .expect_err("scripted failure should surface");

        assert_eq!(
            error.user_message("Failed to start payment"),
            "Razorpay SDK failed to load."
        );
    }

    #[tokio::test]
    async fn recorder_keeps_the_prefill_handed_over() {
        let widget = MockPaymentWidget::new().dismissing();

        let _ = widget.collect(&order(), &prefill()).await;

        let calls = widget.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prefill.name, "Asha Rao");
        assert_eq!(calls[0].order.id, "order_test1");
    }
}
