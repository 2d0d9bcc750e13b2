//! Booking and payment wire types.
//!
//! Everything here follows the server contract byte for byte, including
//! its spelling quirks: dropoff rides as `dropupDt`/`dropupLocation`, the
//! license number as `dlNo`, and the delivery handoff code as
//! `customerOTP`. Rust-side names stay conventional; the serde renames
//! carry the quirks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Statuses
// ═══════════════════════════════════════════════════════════════════════════

/// Booking lifecycle status as spelled by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Created, payment not verified yet.
    Pending,
    /// Paid and confirmed (the server spells it without the trailing -ED).
    Confirm,
    /// Cancelled; terminal.
    Cancelled,
}

impl BookingStatus {
    /// Wire spelling, for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirm => "CONFIRM",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Payment settlement status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// No verified payment yet.
    Pending,
    /// Payment verified.
    Success,
    /// Payment returned after cancellation.
    Refunded,
}

impl PaymentStatus {
    /// Wire spelling, for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Refunded => "REFUNDED",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Denormalized snapshots
// ═══════════════════════════════════════════════════════════════════════════

/// Delivery-agent snapshot embedded once an agent is assigned.
///
/// Deserialization is lenient; the server populates these fields
/// progressively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSnapshot {
    /// Agent display name.
    pub name: Option<String>,
    /// Agent contact number.
    pub phone: Option<String>,
    /// Agent email.
    pub email: Option<String>,
}

/// Car snapshot embedded in a booking.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarSnapshot {
    /// Model name.
    pub model: Option<String>,
    /// Body type (`SUV`, `SEDAN`, ...).
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    /// Daily rate.
    pub price_per_day: Option<f64>,
    /// Image URLs.
    pub images: Vec<String>,
}

/// Reference to the account that made the booking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRef {
    /// Account id.
    pub id: Option<String>,
    /// Account email, used as the prefill fallback.
    pub email: Option<String>,
}

/// Invoice issued after payment verification.
///
/// Lenient: the server omits fields on older records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    /// Human-readable invoice number.
    pub invoice_id: Option<String>,
    /// Download URL.
    pub invoice_url: Option<String>,
    /// Issue timestamp.
    pub invoice_date: Option<DateTime<Utc>>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Booking
// ═══════════════════════════════════════════════════════════════════════════

/// A single rental reservation and its commercial lifecycle.
///
/// Never deleted client-side; cancellation patches the cached copy in
/// place (status `CANCELLED`, payment `REFUNDED`, handoff code cleared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server record id.
    pub id: String,
    /// Human-readable booking code.
    pub booking_id: String,
    /// Renter name as entered on the form.
    pub booking_name: String,
    /// Renter email; falls back to the account email for prefill.
    pub email: Option<String>,
    /// Renter contact number.
    pub contact: String,
    /// Driving license number.
    #[serde(rename = "dlNo")]
    pub license_no: String,
    /// Renter date of birth.
    pub dob: NaiveDate,
    /// Pickup timestamp.
    pub pickup_dt: DateTime<Utc>,
    /// Dropoff timestamp.
    #[serde(rename = "dropupDt")]
    pub dropoff_dt: DateTime<Utc>,
    /// Pickup address.
    pub pickup_location: String,
    /// Dropoff address.
    #[serde(rename = "dropupLocation")]
    pub dropoff_location: String,
    /// Base rental price.
    pub price: f64,
    /// GST rate in percent.
    pub gst: f64,
    /// GST amount.
    pub gst_amount: f64,
    /// Delivery / logistics charge.
    pub logistic_charge: f64,
    /// Grand total, server-computed; the payment order is opened for
    /// exactly this amount.
    pub total_amount: f64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Settlement status.
    pub payment_status: PaymentStatus,
    /// Delivery progress marker; free-form server vocabulary.
    pub delivery_status: Option<String>,
    /// Handoff code shown to the delivery agent; cleared on cancellation.
    #[serde(rename = "customerOTP", default)]
    pub customer_otp: String,
    /// Reason entered when the booking was cancelled.
    pub cancellation_reason: Option<String>,
    /// Assigned delivery agent, once there is one.
    pub assigned_agent: Option<AgentSnapshot>,
    /// Snapshot of the booked car.
    pub booked_car: Option<CarSnapshot>,
    /// Account that made the booking.
    pub booked_by: Option<UserRef>,
    /// Invoice, embedded once payment is verified.
    pub invoice: Option<Invoice>,
}

impl Booking {
    /// Contact fields handed to the payment widget: the renter's name and
    /// number from the form, the email falling back to the account email.
    #[must_use]
    pub fn prefill(&self) -> WidgetPrefill {
        WidgetPrefill {
            name: self.booking_name.clone(),
            email: self
                .email
                .clone()
                .or_else(|| self.booked_by.as_ref().and_then(|u| u.email.clone())),
            contact: self.contact.clone(),
        }
    }

    /// `true` when the booking may be cancelled: only a confirmed booking
    /// qualifies (a pending one has nothing to refund, a cancelled one is
    /// terminal).
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(self.status, BookingStatus::Confirm)
    }

    /// Patch the cached copy after a server-confirmed cancellation,
    /// mirroring exactly what the server does: status and delivery go
    /// `CANCELLED`, the payment is marked refunded, the handoff code is
    /// cleared, and the reason is recorded.
    pub fn apply_cancellation(&mut self, reason: impl Into<String>) {
        self.status = BookingStatus::Cancelled;
        self.payment_status = PaymentStatus::Refunded;
        self.delivery_status = Some("CANCELLED".to_string());
        self.customer_otp.clear();
        self.cancellation_reason = Some(reason.into());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Draft
// ═══════════════════════════════════════════════════════════════════════════

/// Locally validated create payload for POST `/booking`.
///
/// Pricing is absent on purpose: the server computes every money field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Car to reserve.
    pub car_id: String,
    /// Renter name.
    pub booking_name: String,
    /// Renter email, optional on the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Renter contact number.
    pub contact: String,
    /// Driving license number.
    #[serde(rename = "dlNo")]
    pub license_no: String,
    /// Renter date of birth.
    pub dob: NaiveDate,
    /// Requested pickup timestamp.
    pub pickup_dt: DateTime<Utc>,
    /// Requested dropoff timestamp.
    #[serde(rename = "dropupDt")]
    pub dropoff_dt: DateTime<Utc>,
    /// Pickup address.
    pub pickup_location: String,
    /// Dropoff address.
    #[serde(rename = "dropupLocation")]
    pub dropoff_location: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// Payment
// ═══════════════════════════════════════════════════════════════════════════

/// Gateway order descriptor returned by POST `/payment/create-order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    /// Gateway order id.
    pub id: String,
    /// Amount in the gateway's minor units (paise for INR).
    pub amount: u64,
    /// ISO currency code.
    pub currency: String,
}

/// Proof triple produced by the widget callback and forwarded unmodified
/// to POST `/payment/verify`. The gateway's own field names are preserved
/// on the wire; the signature is what the server actually checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Gateway order id.
    #[serde(rename = "razorpay_order_id")]
    pub order_id: String,
    /// Gateway payment id.
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,
    /// Gateway HMAC over order and payment ids.
    #[serde(rename = "razorpay_signature")]
    pub signature: String,
}

/// Contact fields handed to the payment widget alongside the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPrefill {
    /// Renter name.
    pub name: String,
    /// Renter email, when one is known.
    pub email: Option<String>,
    /// Renter contact number.
    pub contact: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// List page
// ═══════════════════════════════════════════════════════════════════════════

/// Body of GET `/booking`: a page of bookings plus pagination counters.
///
/// This is the one list endpoint that does not use the standard envelope.
/// Counters default to zero when omitted; the catalog reducer normalizes
/// them (`page || 1`, `limit || 10`) the way the reference client does.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPage {
    /// The bookings on this page.
    pub data: Vec<Booking>,
    /// 1-based page number.
    pub page: u32,
    /// Total matching bookings across all pages.
    pub total: u32,
    /// Page size.
    pub limit: u32,
}
