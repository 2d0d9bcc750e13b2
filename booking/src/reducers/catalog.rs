//! Booking catalog reducer: paged lists, per-account lists, detail
//! fetches.
//!
//! Catalog failures never toast; the message lands in `state.error` for
//! the caller to render inline. A detail fetch clears the previously
//! selected booking first so a stale record is never shown while the
//! fresh one loads.

use crate::actions::BookingAction;
use crate::environment::BookingEnvironment;
use crate::providers::{BookingApi, PaymentApi, PaymentWidget};
use crate::state::{BookingState, LoadStatus};
use wheelbase_core::effect::Effect;
use wheelbase_core::reducer::Reducer;
use wheelbase_core::{SmallVec, smallvec};

/// Booking catalog reducer.
///
/// Handles the read side: list pages, per-account lists, and details.
#[derive(Debug, Clone)]
pub struct CatalogReducer<B, P, W> {
    /// Phantom data to hold the provider type parameters.
    _phantom: std::marker::PhantomData<(B, P, W)>,
}

impl<B, P, W> CatalogReducer<B, P, W> {
    /// Create a new catalog reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<B, P, W> Default for CatalogReducer<B, P, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, P, W> Reducer for CatalogReducer<B, P, W>
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
        match action {
            // ═══════════════════════════════════════════════════════════════
            // AllBookingsRequested: fetch the paged list
            // ═══════════════════════════════════════════════════════════════
            BookingAction::AllBookingsRequested => {
                state.load = LoadStatus::Loading;

                let api = env.booking_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.all_bookings().await {
                        Ok(page) => Some(BookingAction::AllBookingsLoaded { page }),
                        Err(error) => {
                            tracing::warn!(%error, "booking list fetch failed");
                            Some(BookingAction::BookingsLoadFailed {
                                message: error.user_message("Failed to load bookings"),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // AllBookingsLoaded: normalize counters, derive the page count
            // ═══════════════════════════════════════════════════════════════
            BookingAction::AllBookingsLoaded { page } => {
                // The server omits counters on sparse responses; missing
                // values fall back to the first page and the stock size.
                let page_number = if page.page == 0 { 1 } else { page.page };
                let limit = if page.limit == 0 { 10 } else { page.limit };

                state.bookings = page.data;
                state.page = page_number;
                state.total = page.total;
                state.limit = limit;
                state.total_pages = page.total.div_ceil(limit);
                state.load = LoadStatus::Succeeded;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // UserBookingsRequested: fetch one account's bookings
            // ═══════════════════════════════════════════════════════════════
            BookingAction::UserBookingsRequested { user_id } => {
                state.load = LoadStatus::Loading;

                let api = env.booking_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.user_bookings(&user_id).await {
                        Ok(bookings) => Some(BookingAction::UserBookingsLoaded { bookings }),
                        Err(error) => {
                            tracing::warn!(%error, "user booking fetch failed");
                            Some(BookingAction::BookingsLoadFailed {
                                message: error.user_message("Failed to load bookings"),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // UserBookingsLoaded: replace the list, leave the counters alone
            // ═══════════════════════════════════════════════════════════════
            BookingAction::UserBookingsLoaded { bookings } => {
                state.bookings = bookings;
                state.load = LoadStatus::Succeeded;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingDetailRequested: drop the stale selection, then fetch
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingDetailRequested { booking_id } => {
                state.load = LoadStatus::Loading;
                state.selected = None;

                let api = env.booking_api.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match api.booking(&booking_id).await {
                        Ok(booking) => Some(BookingAction::BookingDetailLoaded { booking }),
                        Err(error) => {
                            tracing::warn!(%error, "booking detail fetch failed");
                            Some(BookingAction::BookingsLoadFailed {
                                message: error.user_message("Failed to load booking"),
                            })
                        }
                    }
                }))]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingDetailLoaded: select it
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingDetailLoaded { booking } => {
                state.selected = Some(booking);
                state.error = None;
                state.load = LoadStatus::Succeeded;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // BookingsLoadFailed: record for inline rendering
            // ═══════════════════════════════════════════════════════════════
            BookingAction::BookingsLoadFailed { message } => {
                state.load = LoadStatus::Failed;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // SelectedBookingCleared: leave the detail view
            // ═══════════════════════════════════════════════════════════════
            BookingAction::SelectedBookingCleared => {
                state.selected = None;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Other actions (not handled by the catalog reducer)
            // ═══════════════════════════════════════════════════════════════
            _ => smallvec![Effect::None],
        }
    }
}
