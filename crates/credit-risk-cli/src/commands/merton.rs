use clap::Args;
use serde_json::Value;

use credit_risk_core::merton::{MertonConfig, MertonModel};

use crate::input;

/// Column order for the tabular output formats.
pub const COLUMNS: &[&str] = &["ticker", "distance_to_default", "probability_of_default"];

/// Arguments for the Merton model batch
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MertonArgs {
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

impl MertonArgs {
    pub fn config(&self) -> MertonConfig {
        MertonConfig {
            risk_free_rate: self.risk_free_rate,
            horizon_years: self.horizon,
        }
    }
}

pub fn run_merton(args: MertonArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let provider = input::portfolio::load(args.input.as_deref())?;
    let tickers = input::portfolio::select_tickers(&provider, args.tickers.as_deref());

    let model = MertonModel::with_config(&provider, args.config());
    let table = model.merton_table(&tickers);
    Ok(serde_json::to_value(table)?)
}
