//! Month-by-month amortisation rolled up into a yearly schedule.
//!
//! The final month always retires whatever balance remains, so the schedule
//! ends on exactly zero and the principal column sums to the loan amount
//! regardless of rounding drift in the running balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::{self, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub loan_amount: Money,
    /// Annual interest rate in percent.
    pub annual_rate: Percent,
    pub term_years: u32,
    /// Also return the individual monthly rows.
    #[serde(default)]
    pub include_monthly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAmortization {
    pub year: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    /// Balance after the last payment of the year.
    pub ending_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAmortization {
    pub month: u32,
    pub principal: Money,
    pub interest: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payments: Money,
    pub yearly_data: Vec<YearlyAmortization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_data: Option<Vec<MonthlyAmortization>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full-term schedule for a level-payment loan.
pub fn generate_amortization_schedule(
    input: &AmortizationInput,
) -> MortgageResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    annuity::check_amount("loan_amount", input.loan_amount)?;
    let monthly_payment = annuity::payment(input.loan_amount, input.annual_rate, input.term_years)?;

    let r = annuity::monthly_rate(input.annual_rate);
    let n = annuity::periods(input.term_years);
    let zero_rate = r.is_zero();

    let mut balance = input.loan_amount;
    let mut total_interest = Decimal::ZERO;

    let mut yearly_data = Vec::with_capacity(input.term_years as usize);
    let mut monthly_data = input
        .include_monthly
        .then(|| Vec::with_capacity(n as usize));

    let mut year_principal = Decimal::ZERO;
    let mut year_interest = Decimal::ZERO;

    for month in 1..=n {
        let (interest, principal) = if month == n {
            // Retire the residual balance; the payment absorbs any drift.
            let interest = if zero_rate {
                Decimal::ZERO
            } else {
                (monthly_payment - balance).max(Decimal::ZERO)
            };
            (interest, balance)
        } else {
            let interest = balance * r;
            let principal = (monthly_payment - interest)
                .min(balance)
                .max(Decimal::ZERO);
            (interest, principal)
        };

        balance = (balance - principal).max(Decimal::ZERO);
        total_interest += interest;
        year_principal += principal;
        year_interest += interest;

        if let Some(rows) = monthly_data.as_mut() {
            rows.push(MonthlyAmortization {
                month,
                principal,
                interest,
                ending_balance: balance,
            });
        }

        if month % MONTHS_PER_YEAR == 0 {
            yearly_data.push(YearlyAmortization {
                year: month / MONTHS_PER_YEAR,
                total_principal: year_principal,
                total_interest: year_interest,
                ending_balance: balance,
            });
            year_principal = Decimal::ZERO;
            year_interest = Decimal::ZERO;
        }
    }

    let total_payments = if zero_rate {
        input.loan_amount
    } else {
        monthly_payment * Decimal::from(n)
    };

    tracing::debug!(
        loan_amount = %input.loan_amount,
        %monthly_payment,
        %total_interest,
        months = n,
        "amortization schedule generated"
    );

    let output = AmortizationOutput {
        loan_amount: input.loan_amount,
        monthly_payment,
        total_interest,
        total_payments,
        yearly_data,
        monthly_data,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortisation schedule (annual roll-up)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
