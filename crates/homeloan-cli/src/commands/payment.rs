use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homeloan_core::payment::{self, PurchaseInput};
use homeloan_core::MortgageConfig;

use crate::input::{self, amount::parse_amount};

/// Arguments for the purchase payment breakdown
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Home price, e.g. 400,000
    #[arg(long, value_parser = parse_amount)]
    pub home_price: Option<Decimal>,

    /// Down payment (defaults to the configured share of the price)
    #[arg(long, alias = "down", value_parser = parse_amount)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent, e.g. 6.5
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Annual property tax as a percent of the price
    #[arg(long)]
    pub property_tax_rate: Option<Decimal>,

    /// Annual homeowners insurance premium
    #[arg(long, value_parser = parse_amount)]
    pub annual_insurance: Option<Decimal>,
}

pub fn run_payment(
    args: PaymentArgs,
    config: &MortgageConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let purchase: PurchaseInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PurchaseInput {
            home_price: args.home_price.unwrap_or(config.defaults.home_price),
            down_payment: args.down_payment,
            annual_rate: args.annual_rate,
            term_years: args.term_years,
            property_tax_rate: args.property_tax_rate,
            annual_insurance: args.annual_insurance,
        },
    };
    let result = payment::calculate_mortgage(config, &purchase)?;
    Ok(serde_json::to_value(result)?)
}
