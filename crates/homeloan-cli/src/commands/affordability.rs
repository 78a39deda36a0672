use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homeloan_core::affordability::{self, AffordabilityInput};
use homeloan_core::MortgageConfig;

use crate::input::{self, amount::parse_amount};

/// Arguments for the DTI affordability estimate
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross annual household income, e.g. 100,000
    #[arg(long, alias = "income", value_parser = parse_amount)]
    pub annual_income: Option<Decimal>,

    /// Other recurring debt payments per month
    #[arg(long, alias = "debts", value_parser = parse_amount, default_value = "0")]
    pub monthly_debts: Decimal,

    /// Cash available for the down payment
    #[arg(long, alias = "down", value_parser = parse_amount, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate in percent (defaults to the configured rate)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,
}

pub fn run_affordability(
    args: AffordabilityArgs,
    config: &MortgageConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordabilityInput {
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            monthly_debts: args.monthly_debts,
            down_payment: args.down_payment,
            annual_rate: args.annual_rate,
        },
    };
    let result = affordability::calculate_affordability(config, &afford_input)?;
    Ok(serde_json::to_value(result)?)
}
