//! Zakat estimation over a donor's declared assets.
//!
//! The policy is fixed: 2.5% on net monetary wealth, gold, silver and
//! business goods, and a flat 5% on agricultural produce. Jurisprudence
//! distinguishes 5% (irrigated) from 10% (rain-fed) produce; the flat rate
//! is a known simplification kept for parity with the published calculator.
//!
//! All arithmetic is checked: values large enough to overflow a `Decimal`
//! are reported as [`CoreError::Validation`] rather than computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 2.5% applied to wealth, gold, silver and business goods.
pub const ZAKAT_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// 5% applied to agricultural produce.
pub const AGRICULTURE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Asset and liability values entered by the donor.
///
/// Every field defaults to zero when absent from the request body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ZakatInput {
    pub liabilities: Decimal,
    pub cash: Decimal,
    pub receivables: Decimal,
    pub stocks: Decimal,
    pub retirement: Decimal,
    pub gold_weight: Decimal,
    pub gold_price_per_gram: Decimal,
    pub silver_weight: Decimal,
    pub silver_price_per_gram: Decimal,
    pub business_goods: Decimal,
    pub agriculture_value: Decimal,
    pub investment_property: Decimal,
    pub other_valuables: Decimal,
    pub livestock: Decimal,
    pub other_assets: Decimal,
}

/// Per-category obligation plus the overall total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZakatResult {
    /// Zakat due on net monetary wealth.
    pub wealth: Decimal,
    pub gold: Decimal,
    pub silver: Decimal,
    pub business_goods: Decimal,
    pub agriculture: Decimal,
    /// Net wealth plus metal, business and agriculture values (before rates).
    pub total_eligible_wealth: Decimal,
    pub total: Decimal,
}

impl ZakatInput {
    /// Sum of the monetary asset categories (metals, business goods and
    /// agriculture are rated separately).
    pub fn total_wealth(&self) -> Result<Decimal, CoreError> {
        checked_sum(
            &[
                self.cash,
                self.receivables,
                self.stocks,
                self.retirement,
                self.investment_property,
                self.other_valuables,
                self.livestock,
                self.other_assets,
            ],
            "total wealth",
        )
    }

    /// Monetary wealth after liabilities, never below zero.
    pub fn net_wealth(&self) -> Result<Decimal, CoreError> {
        let net = self
            .total_wealth()?
            .checked_sub(self.liabilities)
            .ok_or_else(|| overflow("net wealth"))?;
        Ok(net.max(Decimal::ZERO))
    }

    pub fn gold_value(&self) -> Result<Decimal, CoreError> {
        self.gold_weight
            .checked_mul(self.gold_price_per_gram)
            .ok_or_else(|| overflow("gold value"))
    }

    pub fn silver_value(&self) -> Result<Decimal, CoreError> {
        self.silver_weight
            .checked_mul(self.silver_price_per_gram)
            .ok_or_else(|| overflow("silver value"))
    }
}

/// Compute the estimated annual Zakat obligation.
///
/// # Errors
///
/// [`CoreError::Validation`] when an intermediate value overflows.
pub fn calculate_zakat(input: &ZakatInput) -> Result<ZakatResult, CoreError> {
    let net_wealth = input.net_wealth()?;
    let gold_value = input.gold_value()?;
    let silver_value = input.silver_value()?;

    let total_eligible_wealth = checked_sum(
        &[
            net_wealth,
            gold_value,
            silver_value,
            input.business_goods,
            input.agriculture_value,
        ],
        "total eligible wealth",
    )?;

    let wealth = apply_rate(net_wealth, ZAKAT_RATE)?;
    let gold = apply_rate(gold_value, ZAKAT_RATE)?;
    let silver = apply_rate(silver_value, ZAKAT_RATE)?;
    let business_goods = apply_rate(input.business_goods, ZAKAT_RATE)?;
    let agriculture = apply_rate(input.agriculture_value, AGRICULTURE_RATE)?;
    let total = checked_sum(
        &[wealth, gold, silver, business_goods, agriculture],
        "Zakat total",
    )?;

    Ok(ZakatResult {
        wealth: wealth.normalize(),
        gold: gold.normalize(),
        silver: silver.normalize(),
        business_goods: business_goods.normalize(),
        agriculture: agriculture.normalize(),
        total_eligible_wealth: total_eligible_wealth.normalize(),
        total: total.normalize(),
    })
}

fn apply_rate(value: Decimal, rate: Decimal) -> Result<Decimal, CoreError> {
    value
        .checked_mul(rate)
        .ok_or_else(|| overflow("Zakat amount"))
}

fn checked_sum(values: &[Decimal], what: &str) -> Result<Decimal, CoreError> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> CoreError {
    CoreError::Validation(format!("{what} is too large to compute"))
}
