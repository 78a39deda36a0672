use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homeloan_core::amortization::{self, AmortizationInput};
use homeloan_core::MortgageConfig;

use crate::input::{self, amount::parse_amount};

/// Arguments for the yearly amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, e.g. 320,000
    #[arg(long, alias = "loan", value_parser = parse_amount)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (defaults to the configured rate)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years (defaults to the configured term)
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Include every monthly row as well as the yearly roll-up
    #[arg(long)]
    pub monthly: bool,
}

pub fn run_amortization(
    args: AmortizationArgs,
    config: &MortgageConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: AmortizationInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AmortizationInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_rate: args.annual_rate.unwrap_or(config.defaults.interest_rate),
            term_years: args.term_years.unwrap_or(config.defaults.term_years),
            include_monthly: args.monthly,
        },
    };
    let result = amortization::generate_amortization_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
