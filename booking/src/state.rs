//! Booking state.
//!
//! One store holds both halves of the booking feature: the catalog (the
//! fetched list plus the selected booking) and the payment lifecycle of
//! the selected booking. Every mutation flows through
//! [`BookingAction`](crate::actions::BookingAction) and the booking
//! reducers; nothing else writes these fields.

use crate::models::{Booking, Invoice};
use serde::{Deserialize, Serialize};
use wheelbase_platform::FieldErrors;

// ═══════════════════════════════════════════════════════════════════════════
// Load Status
// ═══════════════════════════════════════════════════════════════════════════

/// Progress of a remote operation, mirrored for UI spinners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadStatus {
    /// Nothing in flight and nothing to report.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request completed successfully.
    Succeeded,
    /// The last request failed.
    Failed,
}

impl LoadStatus {
    /// `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// `true` once the last request completed successfully.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// `true` when the last request failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Payment Phase
// ═══════════════════════════════════════════════════════════════════════════

/// Where the payment flow of the selected booking currently stands.
///
/// The flow advances strictly `Idle → Ordering → AwaitingWidget →
/// Verifying → Idle`; each in-flight phase pins the booking id and the
/// attempt number so stale callbacks, timeouts and double-submissions
/// fall through as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentPhase {
    /// No payment in flight.
    #[default]
    Idle,
    /// Order descriptor being obtained from the server.
    Ordering {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt this phase belongs to.
        attempt: u32,
    },
    /// Widget open; suspended until the shopper finishes, dismisses it,
    /// or the timeout fires.
    AwaitingWidget {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt this phase belongs to.
        attempt: u32,
    },
    /// Server-side verification of the widget callback in flight.
    Verifying {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt this phase belongs to.
        attempt: u32,
    },
}

impl PaymentPhase {
    /// `true` when no payment is in flight.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// `true` when an order is being obtained for exactly this booking
    /// and attempt.
    #[must_use]
    pub fn is_ordering_for(&self, booking_id: &str, attempt: u32) -> bool {
        matches!(
            self,
            Self::Ordering { booking_id: current, attempt: stamped }
                if current.as_str() == booking_id && *stamped == attempt
        )
    }

    /// `true` when the widget is open for exactly this booking and
    /// attempt.
    #[must_use]
    pub fn is_awaiting_widget_for(&self, booking_id: &str, attempt: u32) -> bool {
        matches!(
            self,
            Self::AwaitingWidget { booking_id: current, attempt: stamped }
                if current.as_str() == booking_id && *stamped == attempt
        )
    }

    /// `true` when verification is in flight for exactly this booking
    /// and attempt.
    #[must_use]
    pub fn is_verifying_for(&self, booking_id: &str, attempt: u32) -> bool {
        matches!(
            self,
            Self::Verifying { booking_id: current, attempt: stamped }
                if current.as_str() == booking_id && *stamped == attempt
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Booking State
// ═══════════════════════════════════════════════════════════════════════════

/// Client-held booking state.
///
/// The catalog half mirrors the server's pagination counters as sent;
/// the lifecycle half tracks the create → pay → verify flow of the
/// selected booking. Both are mutated only by the booking reducers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingState {
    // ── Catalog ──
    /// The fetched page of bookings (or the signed-in user's bookings).
    pub bookings: Vec<Booking>,
    /// The booking currently being viewed, paid for, or cancelled.
    pub selected: Option<Booking>,
    /// 1-based page number of `bookings`.
    pub page: u32,
    /// Total page count, derived from `total` and `limit`.
    pub total_pages: u32,
    /// Total matching bookings across all pages.
    pub total: u32,
    /// Page size.
    pub limit: u32,
    /// Progress of the last catalog fetch.
    pub load: LoadStatus,
    /// Error message from the last failed catalog fetch.
    pub error: Option<String>,

    // ── Lifecycle ──
    /// Progress of draft submission.
    pub creation: LoadStatus,
    /// Field errors from the last rejected draft (local validation or
    /// server rejection under the `"form"` pseudo-field).
    pub draft_errors: FieldErrors,
    /// Payment flow phase of the selected booking.
    pub payment: PaymentPhase,
    /// Payment attempts started so far; stamps the in-flight phase so
    /// stale widget events are recognizable.
    pub payment_attempt: u32,
    /// Invoice returned by the last successful verification.
    pub invoice: Option<Invoice>,
    /// Progress of cancellation.
    pub cancellation: LoadStatus,
}

impl BookingState {
    /// Create an empty booking state with the stock pagination defaults
    /// (page 1, page size 10).
    #[must_use]
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
            selected: None,
            page: 1,
            total_pages: 1,
            total: 0,
            limit: 10,
            load: LoadStatus::Idle,
            error: None,
            creation: LoadStatus::Idle,
            draft_errors: FieldErrors::new(),
            payment: PaymentPhase::Idle,
            payment_attempt: 0,
            invoice: None,
            cancellation: LoadStatus::Idle,
        }
    }
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new()
    }
}
