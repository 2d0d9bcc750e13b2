//! Booking flow configuration.

use std::time::Duration;

/// Policy knobs for the booking and payment flows.
///
/// Defaults match the rental policy the server enforces; embedders
/// override them only in test rigs or staging environments with relaxed
/// rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// How long an open payment widget may sit unresolved before the
    /// flow gives up and returns to the booking summary.
    ///
    /// Default: 10 minutes
    pub widget_timeout: Duration,

    /// Minimum lead time between "now" and the pickup timestamp.
    ///
    /// Default: 2 hours
    pub min_pickup_lead_hours: i64,

    /// Minimum span between pickup and dropoff.
    ///
    /// Default: 4 hours
    pub min_rental_span_hours: i64,

    /// Minimum renter age in whole years at submission time.
    ///
    /// Default: 18
    pub minimum_renter_age: i32,
}

impl BookingConfig {
    /// Create a configuration with the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            widget_timeout: Duration::from_secs(10 * 60),
            min_pickup_lead_hours: 2,
            min_rental_span_hours: 4,
            minimum_renter_age: 18,
        }
    }

    /// Set the payment widget timeout.
    #[must_use]
    pub const fn with_widget_timeout(mut self, timeout: Duration) -> Self {
        self.widget_timeout = timeout;
        self
    }

    /// Set the minimum pickup lead time in hours.
    #[must_use]
    pub const fn with_min_pickup_lead_hours(mut self, hours: i64) -> Self {
        self.min_pickup_lead_hours = hours;
        self
    }

    /// Set the minimum rental span in hours.
    #[must_use]
    pub const fn with_min_rental_span_hours(mut self, hours: i64) -> Self {
        self.min_rental_span_hours = hours;
        self
    }

    /// Set the minimum renter age in years.
    #[must_use]
    pub const fn with_minimum_renter_age(mut self, years: i32) -> Self {
        self.minimum_renter_age = years;
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::new()
    }
}
