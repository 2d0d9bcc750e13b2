//! Booking actions.
//!
//! The closed set of inputs to the booking reducers. Commands express user
//! or shell intent; events are produced by effects and feed results back
//! into the store. No other code path mutates [`BookingState`].
//!
//! Payment events carry the booking id and the attempt number they were
//! spawned for; the lifecycle reducer drops any event whose stamp no
//! longer matches the in-flight phase.
//!
//! [`BookingState`]: crate::state::BookingState

use crate::models::{
    Booking, BookingDraft, BookingPage, Invoice, PaymentConfirmation, PaymentOrder,
};

/// All inputs to the booking store.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    // ═══════════════════════════════════════════════════════════════
    // Creation
    // ═══════════════════════════════════════════════════════════════
    /// Submit a booking draft. Validates locally first; an invalid draft
    /// never reaches the network.
    DraftSubmitted {
        /// The draft as captured by the form.
        draft: BookingDraft,
    },

    /// The server accepted the draft and assigned ids; the booking
    /// arrives PENDING and becomes the selected booking.
    BookingCreated {
        /// The created booking.
        booking: Booking,
    },

    /// The create call failed after validation passed.
    BookingCreationFailed {
        /// Message to surface.
        message: String,
        /// `true` when the adapter already handled the failure globally
        /// (authorization denial), so no local notification is due.
        handled_globally: bool,
    },

    // ═══════════════════════════════════════════════════════════════
    // Payment
    // ═══════════════════════════════════════════════════════════════
    /// Start payment for the selected booking. Only honored while the
    /// booking is PENDING and no payment attempt is in flight.
    PaymentRequested {
        /// Booking to pay for.
        booking_id: String,
    },

    /// The gateway order descriptor arrived; the widget opens next.
    PaymentOrderOpened {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt this order belongs to.
        attempt: u32,
        /// Order descriptor for the widget.
        order: PaymentOrder,
    },

    /// The shopper completed the gateway flow. The single resume point of
    /// the widget suspension; anything arriving outside the awaiting
    /// phase is dropped with a warning.
    PaymentConfirmed {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt the confirmation belongs to.
        attempt: u32,
        /// Proof triple to forward to the server unmodified.
        confirmation: PaymentConfirmation,
    },

    /// The shopper closed the widget without paying. The flow returns to
    /// the summary state and stays re-payable.
    PaymentWidgetDismissed {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt the dismissal belongs to.
        attempt: u32,
    },

    /// The widget sat unresolved past the configured timeout. Stale
    /// timeouts (the attempt already resolved) are ignored.
    PaymentWidgetTimedOut {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt the timeout was armed for.
        attempt: u32,
    },

    /// Order creation or widget presentation failed before the shopper
    /// could act.
    PaymentFlowFailed {
        /// Booking being paid for.
        booking_id: String,
        /// Attempt that failed.
        attempt: u32,
        /// Message to surface.
        message: String,
        /// `true` when the adapter already handled the failure globally.
        handled_globally: bool,
    },

    /// Server-side verification succeeded: the booking is CONFIRM with a
    /// settled payment, and an invoice exists.
    PaymentVerified {
        /// The updated booking.
        booking: Booking,
        /// Attempt stamp carried through from the confirmation.
        attempt: u32,
        /// Invoice issued for the payment.
        invoice: Option<Invoice>,
    },

    /// Server-side verification failed or errored. The local booking
    /// stays in its pre-attempt state; the user must re-initiate.
    PaymentVerificationFailed {
        /// Booking the attempt was for.
        booking_id: String,
        /// Attempt that failed.
        attempt: u32,
        /// Message to surface.
        message: String,
        /// `true` when the adapter already handled the failure globally.
        handled_globally: bool,
    },

    // ═══════════════════════════════════════════════════════════════
    // Cancellation
    // ═══════════════════════════════════════════════════════════════
    /// Cancel the selected booking with a reason. Only honored for a
    /// CONFIRM booking; PENDING and CANCELLED are rejected locally with
    /// no network call.
    CancellationRequested {
        /// Booking to cancel.
        booking_id: String,
        /// Reason entered by the user.
        reason: String,
    },

    /// The server confirmed the cancellation and refund; the cached
    /// copies are patched in place without a re-fetch.
    BookingCancelled {
        /// Booking that was cancelled.
        booking_id: String,
        /// Reason as submitted.
        reason: String,
    },

    /// The cancel call failed.
    CancellationFailed {
        /// Message to surface.
        message: String,
        /// `true` when the adapter already handled the failure globally.
        handled_globally: bool,
    },

    // ═══════════════════════════════════════════════════════════════
    // Catalog
    // ═══════════════════════════════════════════════════════════════
    /// Fetch the full booking list (back-office view).
    AllBookingsRequested,

    /// The booking page arrived.
    AllBookingsLoaded {
        /// Page body as sent by the server.
        page: BookingPage,
    },

    /// Fetch the signed-in user's bookings.
    UserBookingsRequested {
        /// Account id to fetch for.
        user_id: String,
    },

    /// The user's bookings arrived.
    UserBookingsLoaded {
        /// The bookings, unpaginated.
        bookings: Vec<Booking>,
    },

    /// Fetch one booking by id and select it.
    BookingDetailRequested {
        /// Booking to fetch.
        booking_id: String,
    },

    /// The booking detail arrived and becomes the selected booking.
    BookingDetailLoaded {
        /// The fetched booking.
        booking: Booking,
    },

    /// A catalog fetch failed; the message lands in `state.error`.
    /// Catalog failures render inline rather than toasting, so no
    /// global-handling flag is carried.
    BookingsLoadFailed {
        /// Message for the UI to render.
        message: String,
    },

    /// Drop the selected booking (leaving a detail view).
    SelectedBookingCleared,
}
