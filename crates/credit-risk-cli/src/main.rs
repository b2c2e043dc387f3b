mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::altman::AltmanArgs;
use commands::credit::CreditArgs;
use commands::merton::MertonArgs;

/// Corporate credit risk analysis from financial statements and prices
#[derive(Parser)]
#[command(
    name = "crisk",
    version,
    about = "Corporate credit risk analysis",
    long_about = "Scores a portfolio of companies with the Altman Z-Score and the \
                  Merton structural default model, and joins both into a final \
                  credit decision per ticker. Reads a portfolio JSON document from \
                  a file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Altman Z-Score ratios and scores per ticker
    Altman(AltmanArgs),
    /// Merton distance to default and default probability per ticker
    Merton(MertonArgs),
    /// Joined credit decision table (Altman + Merton)
    Credit(CreditArgs),
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

    type CommandResult = Result<serde_json::Value, Box<dyn std::error::Error>>;
    let (columns, result): (&[&str], CommandResult) = match cli.command {
        Commands::Altman(args) => (commands::altman::COLUMNS, commands::altman::run_altman(args)),
        Commands::Merton(args) => (commands::merton::COLUMNS, commands::merton::run_merton(args)),
        Commands::Credit(args) => (commands::credit::COLUMNS, commands::credit::run_credit(args)),
        Commands::Version => {
            println!("crisk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, columns, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
