//! Validation for public form submissions: contact messages, volunteer
//! applications and testimonials.

use validator::ValidateEmail;

use crate::content::{validate_required, MAX_TITLE_LENGTH};
use crate::error::CoreError;

/// Maximum length for free-text messages.
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Maximum length for an email address (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Testimonial ratings are whole stars.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Minimum password length for donor self-registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.len() > MAX_EMAIL_LENGTH || !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    validate_required("name", name, MAX_TITLE_LENGTH)
}

pub fn validate_message(message: &str) -> Result<(), CoreError> {
    validate_required("message", message, MAX_MESSAGE_LENGTH)
}

/// Optional free-text fields may be absent but not oversized.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Lowercase and trim an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
