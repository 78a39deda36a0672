//! How much house an income supports under front-end and back-end DTI
//! ceilings.
//!
//! Capacity is principal-and-interest only: taxes, insurance and PMI are not
//! deducted, so `max_home_price` is an upper bound rather than an offer
//! price.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::{self, MONTHS_PER_YEAR};
use crate::config::MortgageConfig;
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Gross annual income.
    pub annual_income: Money,
    /// Recurring non-housing debt payments per month.
    #[serde(default)]
    pub monthly_debts: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// Annual interest rate in percent. Defaults to the configured rate.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub annual_rate: Option<Percent>,
}

/// Which DTI ceiling produced the lower payment capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtiConstraint {
    /// Front-end: housing payment alone.
    Housing,
    /// Back-end: housing plus other debts.
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub monthly_income: Money,
    pub max_monthly_payment: Money,
    pub max_home_price: Money,
    pub down_payment: Money,
    pub estimated_loan_amount: Money,
    /// Back-end DTI at the maximum payment, percent, one decimal place.
    pub dti_ratio: Decimal,
    pub binding_constraint: DtiConstraint,
    /// Payment allowed by the housing ceiling.
    pub front_end_limit: Money,
    /// Payment allowed by the total-debt ceiling after existing debts.
    pub back_end_limit: Money,
    /// Term assumed when converting payment capacity to a loan amount.
    pub term_years: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Size the largest affordable purchase and report the binding DTI ceiling.
pub fn calculate_affordability(
    config: &MortgageConfig,
    input: &AffordabilityInput,
) -> MortgageResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let annual_rate = input.annual_rate.unwrap_or(config.defaults.interest_rate);
    annuity::check_rate("annual_rate", annual_rate)?;
    let term_years = config.defaults.term_years;
    let limits = &config.dti_limits;

    let monthly_income = input.annual_income / Decimal::from(MONTHS_PER_YEAR);

    // -- Front-end: housing / income <= housing% ------------------------------
    let front_end_limit = monthly_income * limits.housing / dec!(100);

    // -- Back-end: (housing + debts) / income <= total% -----------------------
    let back_end_raw = monthly_income * limits.total / dec!(100) - input.monthly_debts;
    let back_end_limit = if back_end_raw < Decimal::ZERO {
        warnings.push(format!(
            "Monthly debts of {} exceed the {}% total DTI allowance; no housing payment fits",
            input.monthly_debts, limits.total
        ));
        Decimal::ZERO
    } else {
        back_end_raw
    };

    let (binding_constraint, max_monthly_payment) = if back_end_limit < front_end_limit {
        (DtiConstraint::Total, back_end_limit)
    } else {
        (DtiConstraint::Housing, front_end_limit)
    };

    let estimated_loan_amount = annuity::principal_for(max_monthly_payment, annual_rate, term_years)?;
    let max_home_price = estimated_loan_amount + input.down_payment;

    let dti_ratio = ((max_monthly_payment + input.monthly_debts) / monthly_income * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    tracing::debug!(
        %monthly_income,
        %max_monthly_payment,
        %max_home_price,
        ?binding_constraint,
        "affordability calculated"
    );

    let output = AffordabilityOutput {
        monthly_income,
        max_monthly_payment,
        max_home_price,
        down_payment: input.down_payment,
        estimated_loan_amount,
        dti_ratio,
        binding_constraint,
        front_end_limit,
        back_end_limit,
        term_years,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "annual_rate": annual_rate.to_string(),
        "term_years": term_years,
        "dti_housing_limit": limits.housing.to_string(),
        "dti_total_limit": limits.total.to_string(),
        "payment_scope": "principal_and_interest",
    });

    Ok(with_metadata(
        "DTI affordability (front-end / back-end, inverted annuity)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &AffordabilityInput) -> MortgageResult<()> {
    if input.annual_income <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "annual_income",
            "Annual income must be positive.",
        ));
    }
    annuity::check_amount("annual_income", input.annual_income)?;
    annuity::check_amount("monthly_debts", input.monthly_debts)?;
    annuity::check_amount("down_payment", input.down_payment)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> AffordabilityInput {
        AffordabilityInput {
            annual_income: dec!(120_000),
            monthly_debts: dec!(500),
            down_payment: dec!(50_000),
            annual_rate: Some(dec!(6.5)),
        }
    }

    fn run(input: &AffordabilityInput) -> ComputationOutput<AffordabilityOutput> {
        calculate_affordability(&MortgageConfig::default(), input).unwrap()
    }

    #[test]
    fn test_housing_ratio_binds_with_low_debts() {
        let out = run(&base_input()).result;
        assert_eq!(out.monthly_income, dec!(10_000));
        // front = 2,800; back = 3,600 - 500 = 3,100
        assert_eq!(out.front_end_limit, dec!(2_800));
        assert_eq!(out.back_end_limit, dec!(3_100));
        assert_eq!(out.max_monthly_payment, dec!(2_800));
        assert_eq!(out.binding_constraint, DtiConstraint::Housing);
        // (2,800 + 500) / 10,000 = 33.0%
        assert_eq!(out.dti_ratio, dec!(33.0));
    }

    #[test]
    fn test_total_ratio_binds_with_high_debts() {
        let mut input = base_input();
        input.monthly_debts = dec!(1_200);
        let out = run(&input).result;
        // back = 3,600 - 1,200 = 2,400 < 2,800
        assert_eq!(out.max_monthly_payment, dec!(2_400));
        assert_eq!(out.binding_constraint, DtiConstraint::Total);
        assert_eq!(out.dti_ratio, dec!(36.0));
    }

    #[test]
    fn test_price_is_loan_plus_down_payment() {
        let out = run(&base_input()).result;
        assert_eq!(out.max_home_price, out.estimated_loan_amount + dec!(50_000));
        // 2,800/mo at 6.5% over 30y carries ~443k
        assert!((out.estimated_loan_amount - dec!(442_990.29)).abs() < dec!(0.01));
    }

    #[test]
    fn test_debts_exhaust_back_end() {
        let mut input = base_input();
        input.monthly_debts = dec!(4_000);
        let result = run(&input);
        assert_eq!(result.result.back_end_limit, Decimal::ZERO);
        assert_eq!(result.result.max_monthly_payment, Decimal::ZERO);
        assert_eq!(result.result.estimated_loan_amount, Decimal::ZERO);
        assert_eq!(result.result.max_home_price, dec!(50_000));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_zero_rate_uses_straight_line_inverse() {
        let mut input = base_input();
        input.annual_rate = Some(Decimal::ZERO);
        let out = run(&input).result;
        assert_eq!(out.estimated_loan_amount, dec!(2_800) * dec!(360));
    }

    #[test]
    fn test_default_rate_applied() {
        let mut input = base_input();
        input.annual_rate = None;
        let result = run(&input);
        assert_eq!(result.assumptions["annual_rate"], "6.5");
        assert_eq!(result.result.term_years, 30);
    }

    #[test]
    fn test_zero_income_rejected() {
        let mut input = base_input();
        input.annual_income = Decimal::ZERO;
        let err = calculate_affordability(&MortgageConfig::default(), &input).unwrap_err();
        match err {
            MortgageError::InvalidInput { field, .. } => assert_eq!(field, "annual_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_dti_limits() {
        let mut config = MortgageConfig::default();
        config.dti_limits.housing = dec!(31);
        config.dti_limits.total = dec!(43);
        let out = calculate_affordability(&config, &base_input()).unwrap().result;
        assert_eq!(out.front_end_limit, dec!(3_100));
        assert_eq!(out.back_end_limit, dec!(3_800));
    }
}
