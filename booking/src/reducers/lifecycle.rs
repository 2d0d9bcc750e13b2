//! Booking lifecycle reducer: creation, payment, cancellation.
//!
//! # Flow
//!
//! 1. Local draft validation (renter details, rental window); failures
//!    set field errors and make no network call
//! 2. POST `/booking`; the created booking becomes the selected one and
//!    the flow lands on its summary page
//! 3. POST `/payment/create-order`, then the external widget collects
//!    the payment under a bounded timeout
//! 4. The widget's proof triple goes to POST `/payment/verify`; nothing
//!    is treated as paid until the server agrees
//! 5. Cancelling a confirmed booking patches the cached copy only after
//!    the server confirms
//!
//! Every payment event is stamped with the booking id and attempt number
//! it was spawned for; events from an abandoned attempt are dropped where
//! they land.

use crate::actions::BookingAction;
use crate::config::BookingConfig;
use crate::environment::BookingEnvironment;
use crate::error::BookingError;
use crate::models::{Booking, BookingStatus};
use crate::providers::{BookingApi, PaymentApi, PaymentWidget, WidgetOutcome};
use crate::state::{BookingState, LoadStatus, PaymentPhase};
use crate::validation::validate_draft;
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};
use wheelbase_platform::{FieldError, Route};

/// Booking lifecycle reducer.
///
/// Handles draft creation, the payment saga, and cancellation.
#[derive(Debug, Clone)]
pub struct LifecycleReducer<B, P, W> {
    config: BookingConfig,
    /// Phantom data to hold the provider type parameters.
    _phantom: std::marker::PhantomData<(B, P, W)>,
}

impl<B, P, W> LifecycleReducer<B, P, W> {
    /// Create a lifecycle reducer with the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(BookingConfig::new())
    }

    /// Create a lifecycle reducer with a custom policy.
    #[must_use]
    pub const fn with_config(config: BookingConfig) -> Self {
        Self {
            config,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<B, P, W> Default for LifecycleReducer<B, P, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, P, W> Reducer for LifecycleReducer<B, P, W>
where
    B: BookingApi + Clone + 'static,
    P: PaymentApi + Clone + 'static,
    W: PaymentWidget + Clone + 'static,
{
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment<B, P, W>;

    #[allow(clippy::too_many_lines)] // One match arm per lifecycle event
    #[allow(clippy::cognitive_complexity)] // Payment saga: every arm re-checks the phase stamp
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // DraftSubmitted: validate locally, then create
            // ═══════════════════════════════════════════════════════════════
            BookingAction::DraftSubmitted { draft } => {
                if state.creation.is_loading() {
                    return smallvec![Effect::None];
                }

                let errors = validate_draft(&draft, env.clock.now(), &self.config);
                if !errors.is_empty() {
                    state.creation = LoadStatus::Failed;
                    state.draft_errors = errors;
                    return smallvec![Effect::None];
                }
                state.creation = LoadStatus::Loading;
                state.draft_errors.clear();

                let api = env.booking_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.create_booking(&draft).await {
                        Ok(booking) => Some(BookingAction::BookingCreated { booking }),
                        Err(error) => {
                            tracing::warn!(%error, "booking creation failed");
                            Some(BookingAction::BookingCreationFailed {
                                message: error.user_message("Failed to create booking"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingCreated: select it and land on its summary
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingCreated { booking } => {
                state.creation = LoadStatus::Succeeded;
                state.invoice = None;
                tracing::info!(booking_id = %booking.booking_id, "booking created");

                let destination = Route::BookingSummary {
                    id: booking.id.clone(),
                };
                state.selected = Some(booking);

                let navigator = env.navigator.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    navigator.navigate(destination);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingCreationFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingCreationFailed {
                message,
                handled_globally,
            } => {
                state.creation = LoadStatus::Failed;
                state.draft_errors = vec![FieldError::form(message.clone())];

                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentRequested: open a gateway order for the selected booking
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentRequested { booking_id } => {
                if !state.payment.is_idle() {
                    tracing::warn!(%booking_id, "payment already in flight, ignoring request");
                    return smallvec![Effect::None];
                }
                let Some(booking) = state.selected.as_ref().filter(|b| b.id == booking_id)
                else {
                    tracing::warn!(%booking_id, "payment requested for an unselected booking");
                    return smallvec![Effect::None];
                };
                if booking.status != BookingStatus::Pending {
                    tracing::warn!(
                        %booking_id,
                        status = booking.status.as_str(),
                        "payment requested for a non-pending booking"
                    );
                    return smallvec![Effect::None];
                }
                let amount = booking.total_amount;

                state.payment_attempt += 1;
                let attempt = state.payment_attempt;
                state.payment = PaymentPhase::Ordering {
                    booking_id: booking_id.clone(),
                    attempt,
                };

                let api = env.payment_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.create_order(amount).await {
                        Ok(order) => Some(BookingAction::PaymentOrderOpened {
                            booking_id,
                            attempt,
                            order,
                        }),
                        Err(error) => {
                            tracing::warn!(%error, "payment order creation failed");
                            Some(BookingAction::PaymentFlowFailed {
                                booking_id,
                                attempt,
                                message: error.user_message("Failed to start payment"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentOrderOpened: present the widget under a timeout
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentOrderOpened {
                booking_id,
                attempt,
                order,
            } => {
                if !state.payment.is_ordering_for(&booking_id, attempt) {
                    tracing::warn!(%booking_id, attempt, "stale payment order, dropping");
                    return smallvec![Effect::None];
                }
                let Some(prefill) = state
                    .selected
                    .as_ref()
                    .filter(|b| b.id == booking_id)
                    .map(Booking::prefill)
                else {
                    tracing::warn!(%booking_id, "selection changed while the order was opening");
                    state.payment = PaymentPhase::Idle;
                    return smallvec![Effect::None];
                };
                state.payment = PaymentPhase::AwaitingWidget {
                    booking_id: booking_id.clone(),
                    attempt,
                };

                let widget = env.widget.clone();
                let timeout = BookingAction::PaymentWidgetTimedOut {
                    booking_id: booking_id.clone(),
                    attempt,
                };
                smallvec![
                    Effect::Future(Box::pin(async move {
                        match widget.collect(&order, &prefill).await {
                            Ok(WidgetOutcome::Confirmed(confirmation)) => {
                                Some(BookingAction::PaymentConfirmed {
                                    booking_id,
                                    attempt,
                                    confirmation,
                                })
                            }
                            Ok(WidgetOutcome::Dismissed) => {
                                Some(BookingAction::PaymentWidgetDismissed {
                                    booking_id,
                                    attempt,
                                })
                            }
                            Err(error) => {
                                tracing::warn!(%error, "payment widget failed");
                                Some(BookingAction::PaymentFlowFailed {
                                    booking_id,
                                    attempt,
                                    message: error.user_message("Failed to start payment"),
                                    handled_globally: error.is_authorization_denied(),
                                })
                            }
                        }
                    })),
                    Effect::Delay {
                        duration: self.config.widget_timeout,
                        action: Box::new(timeout),
                    },
                ]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentConfirmed: forward the proof triple for verification
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentConfirmed {
                booking_id,
                attempt,
                confirmation,
            } => {
                if !state.payment.is_awaiting_widget_for(&booking_id, attempt) {
                    tracing::warn!(%booking_id, attempt, "stale payment confirmation, dropping");
                    return smallvec![Effect::None];
                }
                state.payment = PaymentPhase::Verifying {
                    booking_id: booking_id.clone(),
                    attempt,
                };

                let api = env.payment_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.verify_payment(&booking_id, &confirmation).await {
                        Ok(verified) => Some(BookingAction::PaymentVerified {
                            booking: verified.booking,
                            attempt,
                            invoice: verified.invoice,
                        }),
                        Err(error) => {
                            tracing::warn!(%error, "payment verification failed");
                            let message = if matches!(error, BookingError::VerificationRejected) {
                                "Payment verification failed.".to_string()
                            } else {
                                "Server error during verification.".to_string()
                            };
                            Some(BookingAction::PaymentVerificationFailed {
                                booking_id,
                                attempt,
                                message,
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentVerified: apply the confirmed booking
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentVerified {
                booking,
                attempt,
                invoice,
            } => {
                if !state.payment.is_verifying_for(&booking.id, attempt) {
                    tracing::warn!(
                        booking_id = %booking.id,
                        attempt,
                        "stale verification result, dropping"
                    );
                    return smallvec![Effect::None];
                }
                state.payment = PaymentPhase::Idle;
                state.invoice = invoice;
                if let Some(entry) = state.bookings.iter_mut().find(|b| b.id == booking.id) {
                    *entry = booking.clone();
                }
                tracing::info!(booking_id = %booking.booking_id, "payment verified");
                state.selected = Some(booking);

                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.success("Payment verified!");
                    navigator.navigate(Route::PaymentSuccess);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentVerificationFailed: back to the booking list
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentVerificationFailed {
                booking_id,
                attempt,
                message,
                handled_globally,
            } => {
                if !state.payment.is_verifying_for(&booking_id, attempt) {
                    tracing::debug!(%booking_id, attempt, "stale verification failure, dropping");
                    return smallvec![Effect::None];
                }
                state.payment = PaymentPhase::Idle;

                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                let navigator = env.navigator.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    navigator.navigate(Route::MyBookings);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentWidgetDismissed: end the attempt, stay on the summary
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentWidgetDismissed {
                booking_id,
                attempt,
            } => {
                if !state.payment.is_awaiting_widget_for(&booking_id, attempt) {
                    tracing::debug!(%booking_id, attempt, "stale widget dismissal, ignoring");
                    return smallvec![Effect::None];
                }
                tracing::debug!(%booking_id, attempt, "payment widget dismissed");
                state.payment = PaymentPhase::Idle;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentWidgetTimedOut: give up on an unresolved widget
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentWidgetTimedOut {
                booking_id,
                attempt,
            } => {
                if !state.payment.is_awaiting_widget_for(&booking_id, attempt) {
                    tracing::debug!(%booking_id, attempt, "stale widget timeout, ignoring");
                    return smallvec![Effect::None];
                }
                tracing::warn!(%booking_id, attempt, "payment widget timed out");
                state.payment = PaymentPhase::Idle;

                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error("Payment not completed. Please try again.");
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // PaymentFlowFailed: end the attempt and surface the reason
            // ═══════════════════════════════════════════════════════════════
            BookingAction::PaymentFlowFailed {
                booking_id,
                attempt,
                message,
                handled_globally,
            } => {
                let in_flight = state.payment.is_ordering_for(&booking_id, attempt)
                    || state.payment.is_awaiting_widget_for(&booking_id, attempt);
                if !in_flight {
                    tracing::debug!(%booking_id, attempt, "stale payment failure, dropping");
                    return smallvec![Effect::None];
                }
                state.payment = PaymentPhase::Idle;

                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // CancellationRequested: refuse locally unless cancellable
            // ═══════════════════════════════════════════════════════════════
            BookingAction::CancellationRequested { booking_id, reason } => {
                if state.cancellation.is_loading() {
                    return smallvec![Effect::None];
                }
                let Some(booking) = state.selected.as_ref().filter(|b| b.id == booking_id)
                else {
                    tracing::warn!(%booking_id, "cancellation requested for an unselected booking");
                    return smallvec![Effect::None];
                };
                if !booking.is_cancellable() {
                    tracing::warn!(
                        %booking_id,
                        status = booking.status.as_str(),
                        "cancellation refused locally"
                    );
                    return smallvec![Effect::None];
                }
                state.cancellation = LoadStatus::Loading;

                let api = env.booking_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.cancel_booking(&booking_id, &reason).await {
                        Ok(()) => Some(BookingAction::BookingCancelled { booking_id, reason }),
                        Err(error) => {
                            tracing::warn!(%error, "booking cancellation failed");
                            Some(BookingAction::CancellationFailed {
                                message: error.user_message("Failed to cancel booking"),
                                handled_globally: error.is_authorization_denied(),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingCancelled: patch the cached copies, notify
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingCancelled { booking_id, reason } => {
                state.cancellation = LoadStatus::Succeeded;
                if let Some(selected) = state.selected.as_mut().filter(|b| b.id == booking_id) {
                    selected.apply_cancellation(reason.clone());
                }
                if let Some(entry) = state.bookings.iter_mut().find(|b| b.id == booking_id) {
                    entry.apply_cancellation(reason);
                }
                tracing::info!(%booking_id, "booking cancelled");

                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.success("Booking Cancelled, Refund Successful");
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // CancellationFailed: record and surface
            // ═══════════════════════════════════════════════════════════════
            BookingAction::CancellationFailed {
                message,
                handled_globally,
            } => {
                state.cancellation = LoadStatus::Failed;

                if handled_globally {
                    return smallvec![Effect::None];
                }
                let notifier = env.notifier.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    notifier.error(&message);
                    None
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // Other actions (not handled by the lifecycle reducer)
            // ═══════════════════════════════════════════════════════════════
            _ => smallvec![Effect::None],
        }
    }
}
