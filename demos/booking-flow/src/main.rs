//! End-to-end booking walkthrough against mock providers.
//!
//! Drives the session and booking stores through the full customer
//! journey: bootstrap, sign-in, draft submission, payment through the
//! gateway widget, server-side verification, and cancellation. Every
//! provider is an in-memory mock, so the demo is self-contained.
//!
//! Run with:
//! ```bash
//! cargo run --bin booking-flow
//! ```
//!
//! Set `RUST_LOG=debug` to see the reducers' own tracing alongside the
//! walkthrough output.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wheelbase_booking::actions::BookingAction;
use wheelbase_booking::environment::BookingEnvironment;
use wheelbase_booking::mocks::{MockBookingApi, MockPaymentApi, MockPaymentWidget};
use wheelbase_booking::models::BookingDraft;
use wheelbase_booking::reducers::BookingReducer;
use wheelbase_booking::state::BookingState;
use wheelbase_core::SystemClock;
use wheelbase_platform::mocks::{MockCredentialStore, MockNavigator, MockNotifier};
use wheelbase_runtime::Store;
use wheelbase_session::actions::SessionAction;
use wheelbase_session::environment::SessionEnvironment;
use wheelbase_session::mocks::MockAuthApi;
use wheelbase_session::reducers::SessionReducer;
use wheelbase_session::state::SessionState;

/// The store broadcasts a produced action just before feeding it back
/// into the reducer; a short pause lets the state catch up before the
/// next command reads it.
async fn let_state_settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn demo_draft() -> BookingDraft {
    let now = chrono::Utc::now();
    BookingDraft {
        car_id: "car-42".to_string(),
        booking_name: "Asha Rao".to_string(),
        email: Some("asha@example.com".to_string()),
        contact: "+91 98765 43210".to_string(),
        license_no: "KA01 2026 0001".to_string(),
        dob: NaiveDate::from_ymd_opt(1994, 3, 12).unwrap_or_default(),
        pickup_dt: now + chrono::Duration::hours(24),
        dropoff_dt: now + chrono::Duration::hours(72),
        pickup_location: "Indiranagar".to_string(),
        dropoff_location: "Whitefield".to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("=== Wheelbase booking walkthrough ===");

    let navigator = MockNavigator::new();
    let notifier = MockNotifier::new();

    // ── Session: bootstrap, then sign in ──

    let session_env = SessionEnvironment::new(
        MockAuthApi::new(),
        Arc::new(MockCredentialStore::new()),
        Arc::new(navigator.clone()),
        Arc::new(notifier.clone()),
    );
    let session = Store::new(SessionState::new(), SessionReducer::new(), session_env);

    let outcome = session
        .send_and_wait_for(
            SessionAction::BootstrapRequested,
            |action| matches!(action, SessionAction::BootstrapCompleted { .. }),
            Duration::from_secs(5),
        )
        .await
        .context("bootstrap did not complete")?;
    if let SessionAction::BootstrapCompleted { auth } = outcome {
        info!(restored = auth.is_some(), "bootstrap completed");
    }

    let outcome = session
        .send_and_wait_for(
            SessionAction::SignInSubmitted {
                email: "asha@example.com".to_string(),
                password: "hunter2".to_string(),
                remember_me: true,
            },
            |action| {
                matches!(
                    action,
                    SessionAction::SignInSucceeded { .. } | SessionAction::SignInFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .context("sign-in did not resolve")?;
    match outcome {
        SessionAction::SignInSucceeded { user, .. } => {
            info!(email = %user.email, role = ?user.role, "signed in");
        }
        other => anyhow::bail!("sign-in failed: {other:?}"),
    }

    // ── Booking: draft, pay, verify, cancel ──

    let booking_env = BookingEnvironment::new(
        MockBookingApi::new(),
        MockPaymentApi::new(),
        MockPaymentWidget::new(),
        Arc::new(SystemClock),
        Arc::new(navigator.clone()),
        Arc::new(notifier.clone()),
    );
    let store = Store::new(BookingState::new(), BookingReducer::new(), booking_env);

    let outcome = store
        .send_and_wait_for(
            BookingAction::DraftSubmitted {
                draft: demo_draft(),
            },
            |action| {
                matches!(
                    action,
                    BookingAction::BookingCreated { .. }
                        | BookingAction::BookingCreationFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .context("booking creation did not resolve")?;
    let booking_id = match outcome {
        BookingAction::BookingCreated { booking } => {
            info!(
                booking_id = %booking.id,
                reference = %booking.booking_id,
                amount = booking.total_amount,
                "booking created"
            );
            booking.id
        }
        other => anyhow::bail!("booking creation failed: {other:?}"),
    };
    let_state_settle().await;

    let outcome = store
        .send_and_wait_for(
            BookingAction::PaymentRequested {
                booking_id: booking_id.clone(),
            },
            |action| {
                matches!(
                    action,
                    BookingAction::PaymentVerified { .. }
                        | BookingAction::PaymentVerificationFailed { .. }
                        | BookingAction::PaymentFlowFailed { .. }
                )
            },
            Duration::from_secs(10),
        )
        .await
        .context("payment did not resolve")?;
    match outcome {
        BookingAction::PaymentVerified {
            booking, invoice, ..
        } => {
            info!(
                status = booking.status.as_str(),
                payment = booking.payment_status.as_str(),
                invoice = invoice
                    .as_ref()
                    .and_then(|invoice| invoice.invoice_id.as_deref())
                    .unwrap_or("pending"),
                "payment verified"
            );
        }
        other => anyhow::bail!("payment failed: {other:?}"),
    }
    let_state_settle().await;

    let outcome = store
        .send_and_wait_for(
            BookingAction::CancellationRequested {
                booking_id,
                reason: "Change of plans".to_string(),
            },
            |action| {
                matches!(
                    action,
                    BookingAction::BookingCancelled { .. }
                        | BookingAction::CancellationFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await
        .context("cancellation did not resolve")?;
    match outcome {
        BookingAction::BookingCancelled { .. } => info!("booking cancelled, refund issued"),
        other => anyhow::bail!("cancellation failed: {other:?}"),
    }
    let_state_settle().await;

    let summary = store
        .state(|state| {
            state.selected.as_ref().map(|booking| {
                (
                    booking.status.as_str(),
                    booking.payment_status.as_str(),
                    booking.cancellation_reason.clone(),
                )
            })
        })
        .await;
    if let Some((status, payment, reason)) = summary {
        info!(
            status,
            payment,
            reason = reason.as_deref().unwrap_or(""),
            "final booking state"
        );
    }

    info!("── Surfaced to the user along the way ──");
    for (level, message) in notifier.messages() {
        info!(level = ?level, %message, "toast");
    }
    for call in navigator.calls() {
        info!(route = ?call.route(), "navigation");
    }

    Ok(())
}
