use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homeloan_core::refinance::{self, RefinanceInput};

use crate::input::{self, amount::parse_amount};

/// Arguments for the refinance break-even comparison
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance on the current loan
    #[arg(long, alias = "balance", value_parser = parse_amount)]
    pub current_balance: Option<Decimal>,

    /// Current annual rate in percent
    #[arg(long)]
    pub current_rate: Option<Decimal>,

    /// Whole years left on the current loan
    #[arg(long, alias = "years")]
    pub remaining_years: Option<u32>,

    /// Annual rate on the replacement loan in percent
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// One-off closing costs for the new loan
    #[arg(long, alias = "costs", value_parser = parse_amount, default_value = "0")]
    pub closing_costs: Decimal,
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RefinanceInput {
            current_balance: args
                .current_balance
                .ok_or("--current-balance is required (or provide --input)")?,
            current_rate: args
                .current_rate
                .ok_or("--current-rate is required (or provide --input)")?,
            remaining_years: args
                .remaining_years
                .ok_or("--remaining-years is required (or provide --input)")?,
            new_rate: args
                .new_rate
                .ok_or("--new-rate is required (or provide --input)")?,
            closing_costs: args.closing_costs,
        },
    };
    let result = refinance::calculate_refinance(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}
