mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{PaymentArgs, YearOneArgs};
use commands::refinance::CompareArgs;

/// Compare a current mortgage against a refinanced one
#[derive(Parser)]
#[command(
    name = "refi",
    version,
    about = "Compare a current mortgage against a refinanced one",
    long_about = "Projects the first year of a current and a proposed fixed-rate mortgage \
                  with decimal precision and reports the change in monthly instalment, \
                  year-one interest and principal balance."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Calculator settings file (JSON or YAML): limits, rate hint, currency prefix
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the current loan with the refinanced loan over the first year
    Compare(CompareArgs),
    /// Check the six comparison inputs without running the comparison
    Validate(CompareArgs),
    /// Monthly instalment for a single loan
    Payment(PaymentArgs),
    /// Year-one interest and balance for a single loan
    YearOne(YearOneArgs),
    /// Show the benchmark rate hint for the current interest rate
    RateHint,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Summary,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match input::config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::refinance::run_compare(args, &config),
        Commands::Validate(args) => commands::refinance::run_validate(args, &config),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::YearOne(args) => commands::loan::run_year_one(args),
        Commands::RateHint => commands::refinance::run_rate_hint(&config),
        Commands::Version => {
            println!("refi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &config);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
