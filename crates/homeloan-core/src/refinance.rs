//! Rate-and-term refinance comparison.
//!
//! The replacement loan keeps the current balance and the same remaining
//! term, so the two payments differ only by rate.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::annuity;
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current_balance: Money,
    /// Rate on the existing loan, percent.
    pub current_rate: Percent,
    pub remaining_years: u32,
    /// Rate on the replacement loan, percent.
    pub new_rate: Percent,
    #[serde(default)]
    pub closing_costs: Money,
}

/// Months until cumulative savings cover the closing costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Months(u32),
    /// The new payment is not lower, so closing costs are never recovered.
    Never,
}

impl BreakEven {
    pub fn months(&self) -> Option<u32> {
        match self {
            BreakEven::Months(m) => Some(*m),
            BreakEven::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, BreakEven::Never)
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Months(m) => write!(f, "{m} months"),
            BreakEven::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceOutput {
    pub current_payment: Money,
    pub new_payment: Money,
    /// Negative when the replacement loan costs more each month.
    pub monthly_savings: Money,
    pub closing_costs: Money,
    pub break_even: BreakEven,
    /// Savings over the whole remaining term, net of closing costs.
    pub total_savings: Money,
    pub remaining_months: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare the current loan against a same-term replacement at a new rate.
pub fn calculate_refinance(
    input: &RefinanceInput,
) -> MortgageResult<ComputationOutput<RefinanceOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let current_payment =
        annuity::payment(input.current_balance, input.current_rate, input.remaining_years)?;
    let new_payment =
        annuity::payment(input.current_balance, input.new_rate, input.remaining_years)?;
    let monthly_savings = current_payment - new_payment;

    let remaining_months = annuity::periods(input.remaining_years);

    let break_even = if monthly_savings > Decimal::ZERO {
        // Positive savings always pay back eventually; saturate rather than
        // report `Never` when the month count does not fit.
        let months = input
            .closing_costs
            .checked_div(monthly_savings)
            .and_then(|m| m.ceil().to_u32())
            .unwrap_or(u32::MAX);
        BreakEven::Months(months)
    } else {
        BreakEven::Never
    };

    let total_savings =
        monthly_savings * Decimal::from(remaining_months) - input.closing_costs;

    match break_even {
        BreakEven::Never => warnings.push(
            "New payment is not lower than the current payment; closing costs are never recovered"
                .into(),
        ),
        BreakEven::Months(m) if m > remaining_months => warnings.push(format!(
            "Break-even after {m} months falls beyond the {remaining_months} remaining months"
        )),
        BreakEven::Months(_) => {}
    }

    tracing::debug!(
        %current_payment,
        %new_payment,
        %monthly_savings,
        %break_even,
        "refinance analysed"
    );

    let output = RefinanceOutput {
        current_payment,
        new_payment,
        monthly_savings,
        closing_costs: input.closing_costs,
        break_even,
        total_savings,
        remaining_months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rate-and-term refinance break-even (same remaining term)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &RefinanceInput) -> MortgageResult<()> {
    if input.current_balance <= Decimal::ZERO {
        return Err(MortgageError::invalid(
            "current_balance",
            "Current balance must be positive.",
        ));
    }
    annuity::check_amount("current_balance", input.current_balance)?;
    annuity::check_amount("closing_costs", input.closing_costs)?;
    annuity::check_rate("current_rate", input.current_rate)?;
    annuity::check_rate("new_rate", input.new_rate)?;
    annuity::check_term("remaining_years", input.remaining_years)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
