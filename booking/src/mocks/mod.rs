//! Mock provider implementations for testing.
//!
//! In-memory stand-ins for [`BookingApi`](crate::providers::BookingApi),
//! [`PaymentApi`](crate::providers::PaymentApi), and
//! [`PaymentWidget`](crate::providers::PaymentWidget), each with
//! programmable outcomes and a call recorder, for use in unit and
//! integration tests.

pub mod booking_api;
pub mod payment_api;
pub mod widget;

pub use booking_api::{BookingCall, MockBookingApi};
pub use payment_api::{MockPaymentApi, PaymentCall};
pub use widget::{MockPaymentWidget, WidgetCall, WidgetScript};

use crate::error::BookingError;
use crate::models::{Booking, BookingStatus, PaymentStatus, UserRef};
use chrono::{DateTime, Utc};
use wheelbase_platform::PlatformError;

/// How a programmed failure presents.
#[derive(Debug, Clone)]
pub(crate) enum FailureMode {
    /// Server rejection carrying this message.
    Api(String),
    /// Authorization denial, as after the adapter's global 401 handling.
    Denied,
}

impl FailureMode {
    pub(crate) fn into_error(self) -> BookingError {
        match self {
            Self::Api(message) => PlatformError::Api {
                status: 400,
                message,
            }
            .into(),
            Self::Denied => PlatformError::AuthorizationDenied.into(),
        }
    }
}

/// Generate a gateway-style id (`prefix_` plus 14 alphanumerics).
pub(crate) fn gateway_id(prefix: &str) -> String {
    use rand::Rng;

    let suffix: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(14)
        .map(char::from)
        .collect();
    format!("{prefix}_{suffix}")
}

#[allow(clippy::expect_used)] // Test mock: hardcoded timestamps always parse
fn timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("hardcoded timestamp should always parse")
        .with_timezone(&Utc)
}

/// Stock booking handed out when nothing was programmed: `PENDING`,
/// unpaid, priced like a weekend hatchback rental.
#[must_use]
pub fn stock_booking(id: &str) -> Booking {
    Booking {
        id: id.to_string(),
        booking_id: format!("WB-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]),
        booking_name: "Mock Renter".to_string(),
        email: None,
        contact: "+91 98765 43210".to_string(),
        license_no: "KA01 2026 0001".to_string(),
        dob: chrono::NaiveDate::from_ymd_opt(1994, 3, 12).unwrap_or_default(),
        pickup_dt: timestamp("2026-09-01T10:00:00Z"),
        dropoff_dt: timestamp("2026-09-03T10:00:00Z"),
        pickup_location: "Indiranagar".to_string(),
        dropoff_location: "Whitefield".to_string(),
        price: 4800.0,
        gst: 18.0,
        gst_amount: 864.0,
        logistic_charge: 300.0,
        total_amount: 5964.0,
        status: BookingStatus::Pending,
        payment_status: PaymentStatus::Pending,
        delivery_status: None,
        customer_otp: String::new(),
        cancellation_reason: None,
        assigned_agent: None,
        booked_car: None,
        booked_by: Some(UserRef {
            id: Some("u-mock".to_string()),
            email: Some("renter@example.com".to_string()),
        }),
        invoice: None,
    }
}
