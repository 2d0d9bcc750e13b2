//! [`BookingApi`] and [`PaymentApi`] over the shared platform HTTP adapter.

use super::{BookingApi, PaymentApi, VerifiedPayment};
use crate::error::{BookingError, Result};
use crate::models::{
    Booking, BookingDraft, BookingPage, Invoice, PaymentConfirmation, PaymentOrder,
};
use serde::{Deserialize, Serialize};
use wheelbase_platform::http::ApiClient;
use wheelbase_platform::{Envelope, endpoints};

/// Production [`BookingApi`] speaking to the rental API.
///
/// Cheap to clone; clones share the adapter's connection pool. The
/// global 401 policy (credential purge, sign-in redirect) lives in the
/// adapter, so every method here inherits it.
#[derive(Clone)]
pub struct HttpBookingApi {
    client: ApiClient,
}

/// Production [`PaymentApi`] speaking to the rental API.
#[derive(Clone)]
pub struct HttpPaymentApi {
    client: ApiClient,
}

/// `data` body of GET `/booking/:id`. The server has produced both a
/// flat booking and a second `data` wrapper around it; accept either.
#[derive(Deserialize)]
#[serde(untagged)]
enum DetailData {
    Nested { data: Booking },
    Flat(Booking),
}

impl DetailData {
    fn into_booking(self) -> Booking {
        match self {
            Self::Nested { data } | Self::Flat(data) => data,
        }
    }
}

#[derive(Deserialize)]
struct DetailBody {
    data: DetailData,
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    reason: &'a str,
}

#[derive(Serialize)]
struct AmountBody {
    amount: f64,
}

/// Wire body of POST `/payment/verify`: the booking id in the server's
/// camelCase next to the gateway's snake_case proof triple, exactly as
/// the widget produced it.
#[derive(Serialize)]
struct VerifyBody<'a> {
    #[serde(rename = "bookingId")]
    booking_id: &'a str,
    #[serde(flatten)]
    confirmation: &'a PaymentConfirmation,
}

/// `data` body of a successful POST `/payment/verify`.
#[derive(Deserialize)]
struct VerifiedData {
    booking: Booking,
    #[serde(default)]
    invoice: Option<Invoice>,
}

impl HttpBookingApi {
    /// Build over an existing adapter.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl HttpPaymentApi {
    /// Build over an existing adapter.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl BookingApi for HttpBookingApi {
    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking> {
        let envelope: Envelope<Booking> =
            self.client.post(endpoints::booking::ROOT, draft).await?;
        envelope
            .data
            .ok_or(BookingError::MissingPayload(endpoints::booking::ROOT))
    }

    async fn booking(&self, id: &str) -> Result<Booking> {
        let body: DetailBody = self.client.get(&endpoints::booking::detail(id)).await?;
        Ok(body.data.into_booking())
    }

    async fn all_bookings(&self) -> Result<BookingPage> {
        // The list endpoint answers with the page body itself, not the
        // standard envelope.
        Ok(self.client.get(endpoints::booking::ROOT).await?)
    }

    async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        let envelope: Envelope<Vec<Booking>> = self
            .client
            .get(&endpoints::booking::by_user(user_id))
            .await?;
        // A user with no bookings gets an envelope without `data`.
        Ok(envelope.data.unwrap_or_default())
    }

    async fn cancel_booking(&self, id: &str, reason: &str) -> Result<()> {
        let _: Envelope<serde_json::Value> = self
            .client
            .patch(&endpoints::booking::cancel(id), &ReasonBody { reason })
            .await?;
        Ok(())
    }
}

impl PaymentApi for HttpPaymentApi {
    async fn create_order(&self, amount: f64) -> Result<PaymentOrder> {
        let envelope: Envelope<PaymentOrder> = self
            .client
            .post(endpoints::payment::CREATE_ORDER, &AmountBody { amount })
            .await?;
        envelope
            .data
            .ok_or(BookingError::MissingPayload(endpoints::payment::CREATE_ORDER))
    }

    async fn verify_payment(
        &self,
        booking_id: &str,
        confirmation: &PaymentConfirmation,
    ) -> Result<VerifiedPayment> {
        let envelope: Envelope<VerifiedData> = self
            .client
            .post(endpoints::payment::VERIFY, &VerifyBody {
                booking_id,
                confirmation,
            })
            .await?;

        if !envelope.is_success() {
            return Err(BookingError::VerificationRejected);
        }
        let data = envelope
            .data
            .ok_or(BookingError::MissingPayload(endpoints::payment::VERIFY))?;
        Ok(VerifiedPayment {
            booking: data.booking,
            invoice: data.invoice,
        })
    }
}
