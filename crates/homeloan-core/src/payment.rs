//! Purchase scenario: full monthly payment breakdown (PITI + PMI).

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
pub struct PurchaseInput {
    pub home_price: Money,
    /// Cash paid up front. Defaults to the configured share of the price.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub down_payment: Option<Money>,
    /// Annual interest rate in percent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub annual_rate: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub term_years: Option<u32>,
    /// Annual property tax as a percentage of the home price.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub property_tax_rate: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub annual_insurance: Option<Money>,
}

impl PurchaseInput {
    /// A purchase with every optional field left to the configuration.
    pub fn new(home_price: Money) -> Self {
        Self {
            home_price,
            down_payment: None,
            annual_rate: None,
            term_years: None,
            property_tax_rate: None,
            annual_insurance: None,
        }
    }
}

/// Purchase inputs after defaults from the configuration are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPurchase {
    pub home_price: Money,
    pub down_payment: Money,
    pub annual_rate: Percent,
    pub term_years: u32,
    pub property_tax_rate: Percent,
    pub annual_insurance: Money,
    pub pmi_rate: Percent,
    pub pmi_equity_threshold: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub home_price: Money,
    pub loan_amount: Money,
    pub down_payment: Money,
    /// Down payment as a whole-number percentage of the price.
    pub down_payment_percent: Decimal,
    /// Principal and interest.
    pub monthly_pi: Money,
    pub monthly_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_pmi: Money,
    pub has_pmi: bool,
    pub total_monthly_payment: Money,
    /// P&I paid over the full term.
    pub total_payments: Money,
    pub total_interest: Money,
    /// Down payment at which PMI stops applying.
    pub down_payment_to_avoid_pmi: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly cost of buying a home with a fixed-rate mortgage.
pub fn calculate_mortgage(
    config: &MortgageConfig,
    input: &PurchaseInput,
) -> MortgageResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.home_price <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "home_price",
            "Home price must be positive.",
        ));
    }
    annuity::check_amount("home_price", input.home_price)?;

    let resolved = resolve(config, input);
    validate(config, &resolved)?;

    let home_price = resolved.home_price;
    let down_payment = resolved.down_payment;

    let loan_amount = if down_payment > home_price {
        warnings.push(format!(
            "Down payment {down_payment} exceeds home price {home_price}; loan amount set to zero"
        ));
        Decimal::ZERO
    } else {
        home_price - down_payment
    };

    let down_payment_percent = (down_payment / home_price * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let months = Decimal::from(MONTHS_PER_YEAR);
    let monthly_pi = annuity::payment(loan_amount, resolved.annual_rate, resolved.term_years)?;
    let monthly_tax = home_price * resolved.property_tax_rate / dec!(100) / months;
    let monthly_insurance = resolved.annual_insurance / months;

    let has_pmi = down_payment_percent < resolved.pmi_equity_threshold;
    let monthly_pmi = if has_pmi {
        loan_amount * resolved.pmi_rate / dec!(100) / months
    } else {
        Decimal::ZERO
    };

    let total_monthly_payment = monthly_pi + monthly_tax + monthly_insurance + monthly_pmi;
    let total_payments = monthly_pi * Decimal::from(annuity::periods(resolved.term_years));
    let total_interest = total_payments - loan_amount;

    if has_pmi && loan_amount > Decimal::ZERO {
        warnings.push(format!(
            "Down payment is {down_payment_percent}% of price; PMI applies below {}%",
            resolved.pmi_equity_threshold
        ));
    }

    tracing::debug!(
        %loan_amount,
        %monthly_pi,
        %total_monthly_payment,
        has_pmi,
        "mortgage payment calculated"
    );

    let output = MortgageOutput {
        home_price,
        loan_amount,
        down_payment,
        down_payment_percent,
        monthly_pi,
        monthly_tax,
        monthly_insurance,
        monthly_pmi,
        has_pmi,
        total_monthly_payment,
        total_payments,
        total_interest,
        down_payment_to_avoid_pmi: home_price * resolved.pmi_equity_threshold / dec!(100),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate mortgage payment (PITI + PMI)",
        &resolved,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn resolve(config: &MortgageConfig, input: &PurchaseInput) -> ResolvedPurchase {
    let d = &config.defaults;
    ResolvedPurchase {
        home_price: input.home_price,
        down_payment: input
            .down_payment
            .unwrap_or(input.home_price * d.down_payment_percent / dec!(100)),
        annual_rate: input.annual_rate.unwrap_or(d.interest_rate),
        term_years: input.term_years.unwrap_or(d.term_years),
        property_tax_rate: input.property_tax_rate.unwrap_or(d.property_tax_rate),
        annual_insurance: input.annual_insurance.unwrap_or(d.home_insurance_year),
        pmi_rate: d.pmi_rate,
        pmi_equity_threshold: d.pmi_equity_threshold,
    }
}

fn validate(config: &MortgageConfig, input: &ResolvedPurchase) -> MortgageResult<()> {
    annuity::check_amount("down_payment", input.down_payment)?;
    annuity::check_amount("annual_insurance", input.annual_insurance)?;
    annuity::check_rate("annual_rate", input.annual_rate)?;
    annuity::check_rate("property_tax_rate", input.property_tax_rate)?;
    config.check_loan_term(input.term_years)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
