//! Local form validation.
//!
//! These checks run before any network call; a failing form never leaves
//! the client. Messages match what the UI shows next to each field.

use crate::actions::SignUpForm;
use crate::config::SessionConfig;
use crate::state::{FieldError, FieldErrors};

/// `true` when `email` contains a plausible address: a whitespace-free
/// `local@host.tld` chunk with all three parts non-empty.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.split_whitespace().any(|chunk| {
        let Some((local, domain)) = chunk.split_once('@') else {
            return false;
        };
        if local.is_empty() {
            return false;
        }
        domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    })
}

/// `true` when `code` is exactly `length` ASCII digits.
#[must_use]
pub fn is_valid_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| b.is_ascii_digit())
}

/// Validate the sign-in form. Empty result means the form may be
/// submitted.
#[must_use]
pub fn validate_sign_in(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}

/// Validate the sign-up form. Empty result means the form may be
/// submitted.
#[must_use]
pub fn validate_sign_up(form: &SignUpForm, config: &SessionConfig) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !form.agree_terms {
        errors.push(FieldError::new(
            "agree_terms",
            "You must agree to the terms and conditions",
        ));
    }

    if form.first_name.trim().is_empty() {
        errors.push(FieldError::new("first_name", "First name is required"));
    }
    if form.last_name.trim().is_empty() {
        errors.push(FieldError::new("last_name", "Last name is required"));
    }

    if form.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(&form.email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if form.password.chars().count() < config.min_password_length {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be at least {} characters",
                config.min_password_length
            ),
        ));
    }

    if form.password != form.confirm_password {
        errors.push(FieldError::new(
            "confirm_password",
            "Passwords do not match",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> SignUpForm {
        SignUpForm {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            password: "wheelbase1".to_string(),
            confirm_password: "wheelbase1".to_string(),
            agree_terms: true,
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("rider@wheelbase.app"));
        assert!(is_valid_email("first.last@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("rider"));
        assert!(!is_valid_email("rider@host"));
        assert!(!is_valid_email("@host.com"));
        assert!(!is_valid_email("rider@.com"));
        assert!(!is_valid_email("rider@host."));
    }

    #[test]
    fn code_must_be_exact_digits() {
        assert!(is_valid_code("123456", 6));
        assert!(!is_valid_code("12345", 6));
        assert!(!is_valid_code("1234567", 6));
        assert!(!is_valid_code("12345a", 6));
        assert!(!is_valid_code("", 6));
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let errors = validate_sign_in("", "");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Email is required");
        assert_eq!(errors[1].message, "Password is required");
    }

    #[test]
    fn sign_in_rejects_bad_email_format() {
        let errors = validate_sign_in("not-an-email", "hunter2");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Please enter a valid email");
    }

    #[test]
    fn sign_in_accepts_complete_form() {
        assert!(validate_sign_in("rider@wheelbase.app", "hunter2").is_empty());
    }

    #[test]
    fn sign_up_accepts_complete_form() {
        assert!(validate_sign_up(&complete_form(), &SessionConfig::new()).is_empty());
    }

    #[test]
    fn sign_up_enforces_password_length() {
        let mut form = complete_form();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();

        let errors = validate_sign_up(&form, &SessionConfig::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn sign_up_enforces_confirmation_match() {
        let mut form = complete_form();
        form.confirm_password = "different1".to_string();

        let errors = validate_sign_up(&form, &SessionConfig::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
    }

    #[test]
    fn sign_up_requires_terms_and_names() {
        let form = SignUpForm::default();
        let errors = validate_sign_up(&form, &SessionConfig::new());

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"agree_terms"));
        assert!(fields.contains(&"first_name"));
        assert!(fields.contains(&"last_name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
    }
}
