use clap::Args;
use serde_json::Value;

use credit_risk_core::altman::AltmanModel;
use credit_risk_core::decision::credit_report;
use credit_risk_core::merton::{MertonConfig, MertonModel};

use crate::input;

/// Column order for the tabular output formats.
pub const COLUMNS: &[&str] = &[
    "ticker",
    "z_score",
    "distance_to_default",
    "probability_of_default",
    "decision",
];

/// Arguments for the joined credit decision table
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CreditArgs {
    /// Path to portfolio JSON file (or pipe the document via stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated ticker filter (defaults to the whole portfolio)
    #[arg(long)]
    pub tickers: Option<String>,

    /// Risk-free rate, annualized decimal
    #[arg(long, default_value_t = credit_risk_core::merton::DEFAULT_RISK_FREE_RATE)]
    pub risk_free_rate: f64,

    /// Default horizon in years
    #[arg(long, default_value_t = credit_risk_core::merton::DEFAULT_HORIZON_YEARS)]
    pub horizon: f64,
}

pub fn run_credit(args: CreditArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let provider = input::portfolio::load(args.input.as_deref())?;
    let tickers = input::portfolio::select_tickers(&provider, args.tickers.as_deref());

    let altman = AltmanModel::new(&provider);
    let merton = MertonModel::with_config(
        &provider,
        MertonConfig {
            risk_free_rate: args.risk_free_rate,
            horizon_years: args.horizon,
        },
    );

    let report = credit_report(
        &altman.z_score_table(&tickers),
        &merton.merton_table(&tickers),
    );
    Ok(serde_json::to_value(report)?)
}
