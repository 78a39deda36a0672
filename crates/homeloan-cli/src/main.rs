mod commands;
mod input;
mod output;
mod settings;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordabilityArgs;
use commands::amortization::AmortizationArgs;
use commands::payment::PaymentArgs;
use commands::refinance::RefinanceArgs;

/// Residential mortgage calculations
#[derive(Parser)]
#[command(
    name = "homeloan",
    version,
    about = "Residential mortgage calculations",
    long_about = "A CLI for residential mortgage calculations with decimal precision. \
                  Supports monthly payment breakdowns, DTI affordability, amortization \
                  schedules, and refinance break-even analysis."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Configuration file (JSON or YAML). Falls back to $HOMELOAN_CONFIG.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log filter when RUST_LOG is unset (e.g. warn, debug)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment breakdown for a purchase (P&I, tax, insurance, PMI)
    Payment(PaymentArgs),
    /// Maximum affordable home price under DTI limits
    Affordability(AffordabilityArgs),
    /// Yearly amortization schedule for a level-payment loan
    Amortization(AmortizationArgs),
    /// Refinance savings and break-even point
    Refinance(RefinanceArgs),
    /// Print the effective configuration
    Config,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let config = match settings::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run_payment(args, &config),
        Commands::Affordability(args) => {
            commands::affordability::run_affordability(args, &config)
        }
        Commands::Amortization(args) => commands::amortization::run_amortization(args, &config),
        Commands::Refinance(args) => commands::refinance::run_refinance(args),
        Commands::Config => serde_json::to_value(&config).map_err(Into::into),
        Commands::Version => {
            println!("homeloan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
