//! Donation and subscription status constants, amount validation, and
//! conversion to the payment provider's minor currency units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Donation statuses
// ---------------------------------------------------------------------------

/// Payment completed and funds captured.
pub const STATUS_COMPLETED: &str = "completed";
/// Payment intent created, awaiting confirmation.
pub const STATUS_PENDING: &str = "pending";
/// Payment was declined or errored.
pub const STATUS_FAILED: &str = "failed";

/// All valid donation statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_COMPLETED, STATUS_PENDING, STATUS_FAILED];

// ---------------------------------------------------------------------------
// Donation frequencies
// ---------------------------------------------------------------------------

pub const FREQUENCY_ONE_TIME: &str = "one_time";
pub const FREQUENCY_MONTHLY: &str = "monthly";

pub const VALID_FREQUENCIES: &[&str] = &[FREQUENCY_ONE_TIME, FREQUENCY_MONTHLY];

// ---------------------------------------------------------------------------
// Subscription statuses and intervals
// ---------------------------------------------------------------------------

pub const SUBSCRIPTION_ACTIVE: &str = "active";
pub const SUBSCRIPTION_CANCELLED: &str = "cancelled";
pub const SUBSCRIPTION_PAST_DUE: &str = "past_due";

pub const VALID_SUBSCRIPTION_STATUSES: &[&str] =
    &[SUBSCRIPTION_ACTIVE, SUBSCRIPTION_CANCELLED, SUBSCRIPTION_PAST_DUE];

pub const INTERVAL_MONTH: &str = "month";
pub const INTERVAL_YEAR: &str = "year";

pub const VALID_INTERVALS: &[&str] = &[INTERVAL_MONTH, INTERVAL_YEAR];

// ---------------------------------------------------------------------------
// Amount limits
// ---------------------------------------------------------------------------

/// Smallest accepted donation (one currency unit).
pub const MIN_AMOUNT: Decimal = Decimal::ONE;

/// Largest accepted single donation.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Currencies the platform accepts, lowercase ISO 4217.
pub const SUPPORTED_CURRENCIES: &[&str] = &["usd", "gbp", "eur", "cad", "aud"];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a donation status string is known.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_one_of(status, VALID_STATUSES, "donation status")
}

pub fn validate_frequency(frequency: &str) -> Result<(), CoreError> {
    validate_one_of(frequency, VALID_FREQUENCIES, "donation frequency")
}

pub fn validate_subscription_status(status: &str) -> Result<(), CoreError> {
    validate_one_of(status, VALID_SUBSCRIPTION_STATUSES, "subscription status")
}

pub fn validate_interval(interval: &str) -> Result<(), CoreError> {
    validate_one_of(interval, VALID_INTERVALS, "subscription interval")
}

/// Validate a lowercase ISO currency code against [`SUPPORTED_CURRENCIES`].
pub fn validate_currency(currency: &str) -> Result<(), CoreError> {
    validate_one_of(currency, SUPPORTED_CURRENCIES, "currency")
}

/// Validate a donation amount: within `[MIN_AMOUNT, MAX_AMOUNT]` and at
/// most two decimal places.
pub fn validate_amount(amount: Decimal) -> Result<(), CoreError> {
    if amount < MIN_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Donation amount must be at least {MIN_AMOUNT}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Donation amount must not exceed {MAX_AMOUNT}"
        )));
    }
    if amount.normalize().scale() > 2 {
        return Err(CoreError::Validation(
            "Donation amount must have at most two decimal places".to_string(),
        ));
    }
    Ok(())
}

/// Convert a validated amount to minor units (e.g. dollars to cents).
pub fn to_minor_units(amount: Decimal) -> Result<i64, CoreError> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| CoreError::Validation(format!("Amount {amount} is out of range")))
}

/// Convert minor units reported by the payment provider back to an amount.
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

fn validate_one_of(value: &str, allowed: &[&str], what: &str) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {what} '{value}'. Must be one of: {allowed:?}"
        )))
    }
}
