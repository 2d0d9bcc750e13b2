//! Local draft validation.
//!
//! These checks run before any network call; a failing draft never leaves
//! the client. Messages match what the UI shows next to each field.

use crate::config::BookingConfig;
use crate::models::BookingDraft;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use wheelbase_platform::{FieldError, FieldErrors};

/// `true` when `contact` is a plausible phone number: an optional leading
/// `+`, then at least ten characters drawn from digits, spaces, hyphens,
/// and parentheses.
#[must_use]
pub fn is_valid_contact(contact: &str) -> bool {
    let rest = contact.strip_prefix('+').unwrap_or(contact);
    rest.len() >= 10
        && rest
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b' ' | b'-' | b'(' | b')'))
}

/// `true` when `license` looks like a driving license number: 6 to 20
/// characters of alphanumerics, spaces, and hyphens.
#[must_use]
pub fn is_valid_license(license: &str) -> bool {
    let len = license.chars().count();
    (6..=20).contains(&len)
        && license
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
}

/// Whole years between `dob` and `today`, counting a birthday today as
/// already completed.
fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Validate a booking draft against the rental policy at time `now`.
/// Empty result means the draft may be submitted.
#[must_use]
pub fn validate_draft(
    draft: &BookingDraft,
    now: DateTime<Utc>,
    config: &BookingConfig,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.booking_name.trim().is_empty() {
        errors.push(FieldError::new("booking_name", "Full name is required"));
    }

    if draft.contact.trim().is_empty() {
        errors.push(FieldError::new("contact", "Contact number is required"));
    } else if !is_valid_contact(&draft.contact) {
        errors.push(FieldError::new(
            "contact",
            "Please enter a valid contact number",
        ));
    }

    if draft.license_no.trim().is_empty() {
        errors.push(FieldError::new("license_no", "License number is required"));
    } else if !is_valid_license(&draft.license_no) {
        errors.push(FieldError::new(
            "license_no",
            "Please enter a valid license number",
        ));
    }

    if age_on(draft.dob, now.date_naive()) < config.minimum_renter_age {
        errors.push(FieldError::new(
            "dob",
            format!(
                "You must be at least {} years old to book",
                config.minimum_renter_age
            ),
        ));
    }

    if draft.pickup_dt < now + Duration::hours(config.min_pickup_lead_hours) {
        errors.push(FieldError::new(
            "pickup_dt",
            format!(
                "Pickup time must be at least {} hours from now",
                config.min_pickup_lead_hours
            ),
        ));
    }

    if draft.dropoff_dt < draft.pickup_dt + Duration::hours(config.min_rental_span_hours) {
        errors.push(FieldError::new(
            "dropoff_dt",
            format!(
                "Dropoff time must be at least {} hours after pickup time",
                config.min_rental_span_hours
            ),
        ));
    }

    if draft.pickup_location.trim().is_empty() {
        errors.push(FieldError::new(
            "pickup_location",
            "Pickup location is required",
        ));
    }
    if draft.dropoff_location.trim().is_empty() {
        errors.push(FieldError::new(
            "dropoff_location",
            "Dropoff location is required",
        ));
    }

    errors
}
