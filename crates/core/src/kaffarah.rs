//! Kaffarah (atonement) for intentionally broken fasts.
//!
//! Each missed day obliges feeding sixty people, or alternatively fasting
//! sixty consecutive days.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// People to feed (or days to fast) per broken fast.
pub const PEOPLE_PER_DAY: i64 = 60;

/// How the donor intends to discharge the obligation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    #[default]
    Feeding,
    Monetary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KaffarahInput {
    pub days_missed: i64,
    pub food_cost_per_person: Decimal,
    #[serde(default)]
    pub calculation_method: CalculationMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KaffarahResult {
    pub days_missed: i64,
    pub people_to_feed: i64,
    pub total_amount: Decimal,
    /// Only set for the monetary method, where it is shown as the
    /// alternative of fasting two consecutive months per day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_fast: Option<i64>,
    pub calculation_method: CalculationMethod,
}

/// Compute the Kaffarah obligation.
///
/// Rejects `days_missed <= 0` and a negative per-person cost.
pub fn calculate_kaffarah(input: &KaffarahInput) -> Result<KaffarahResult, CoreError> {
    if input.days_missed <= 0 {
        return Err(CoreError::Validation(
            "days_missed must be at least 1".to_string(),
        ));
    }
    if input.food_cost_per_person.is_sign_negative() {
        return Err(CoreError::Validation(
            "food_cost_per_person must not be negative".to_string(),
        ));
    }

    let people_to_feed = input
        .days_missed
        .checked_mul(PEOPLE_PER_DAY)
        .ok_or_else(|| CoreError::Validation("days_missed is too large".to_string()))?;

    let total_amount = Decimal::from(people_to_feed)
        .checked_mul(input.food_cost_per_person)
        .ok_or_else(|| CoreError::Validation("Kaffarah amount overflows".to_string()))?;

    let days_to_fast = match input.calculation_method {
        CalculationMethod::Monetary => Some(people_to_feed),
        CalculationMethod::Feeding => None,
    };

    Ok(KaffarahResult {
        days_missed: input.days_missed,
        people_to_feed,
        total_amount: total_amount.normalize(),
        days_to_fast,
        calculation_method: input.calculation_method,
    })
}
