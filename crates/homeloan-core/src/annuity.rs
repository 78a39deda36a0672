//! Level-payment annuity maths for fixed-rate, fully-amortising loans.
//!
//! Every calculator funnels through [`payment`] or its inverse
//! [`principal_for`]. Rates come in as annual percentages and are converted
//! to a monthly decimal rate here.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest supported term. Keeps the schedule at or under 600 months.
pub const MAX_TERM_YEARS: u32 = 50;

/// Highest supported annual rate, in percent.
pub const MAX_ANNUAL_RATE: Percent = dec!(100);

/// Ceiling for any single money input so products and sums stay inside
/// the 96-bit decimal range.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000);

/// Monthly periodic rate for an annual percentage (6.5 -> 0.0054166...).
pub fn monthly_rate(annual_rate: Percent) -> Rate {
    annual_rate / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Number of monthly periods in a term of whole years.
pub fn periods(term_years: u32) -> u32 {
    term_years * MONTHS_PER_YEAR
}

/// Monthly payment that fully repays `principal` over `term_years`.
pub fn payment(principal: Money, annual_rate: Percent, term_years: u32) -> MortgageResult<Money> {
    check_amount("principal", principal)?;
    check_rate_and_term(annual_rate, term_years)?;

    let r = monthly_rate(annual_rate);
    let n = periods(term_years);

    if r.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    // P * r * f / (f - 1) rewritten as P * r / (1 - 1/f) to keep the
    // intermediate product small.
    let discount = Decimal::ONE - Decimal::ONE / growth_factor(r, n)?;
    Ok(principal * r / discount)
}

/// Principal that a fixed monthly payment can carry over `term_years`.
pub fn principal_for(
    target_payment: Money,
    annual_rate: Percent,
    term_years: u32,
) -> MortgageResult<Money> {
    check_amount("target_payment", target_payment)?;
    check_rate_and_term(annual_rate, term_years)?;

    let r = monthly_rate(annual_rate);
    let n = periods(term_years);

    if r.is_zero() {
        return Ok(target_payment * Decimal::from(n));
    }

    let discount = Decimal::ONE - Decimal::ONE / growth_factor(r, n)?;
    Ok(target_payment * discount / r)
}

/// (1 + r)^n
fn growth_factor(r: Rate, n: u32) -> MortgageResult<Decimal> {
    (Decimal::ONE + r)
        .checked_powu(u64::from(n))
        .ok_or_else(|| MortgageError::Overflow {
            context: format!("(1 + {r})^{n}"),
        })
}

pub(crate) fn check_amount(field: &str, value: Money) -> MortgageResult<()> {
    if value < Decimal::ZERO {
        return Err(MortgageError::invalid(field, "Amount cannot be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(MortgageError::invalid(
            field,
            format!("Amount exceeds the supported maximum of {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_rate(field: &str, annual_rate: Percent) -> MortgageResult<()> {
    if annual_rate < Decimal::ZERO {
        return Err(MortgageError::invalid(field, "Rate cannot be negative"));
    }
    if annual_rate > MAX_ANNUAL_RATE {
        return Err(MortgageError::invalid(
            field,
            format!("Rate cannot exceed {MAX_ANNUAL_RATE}%"),
        ));
    }
    Ok(())
}

pub(crate) fn check_term(field: &str, term_years: u32) -> MortgageResult<()> {
    if term_years == 0 || term_years > MAX_TERM_YEARS {
        return Err(MortgageError::invalid(
            field,
            format!("Term must be between 1 and {MAX_TERM_YEARS} years"),
        ));
    }
    Ok(())
}

fn check_rate_and_term(annual_rate: Percent, term_years: u32) -> MortgageResult<()> {
    check_rate("annual_rate", annual_rate)?;
    check_term("term_years", term_years)
}
