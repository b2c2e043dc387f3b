use clap::Args;
use serde_json::Value;

use credit_risk_core::altman::AltmanModel;

use crate::input;

/// Column order for the tabular output formats.
pub const COLUMNS: &[&str] = &["ticker", "x1", "x2", "x3", "x4", "x5", "z_score"];

/// Arguments for the Altman Z-Score batch
#[derive(Args)]
pub struct AltmanArgs {
    /// Path to portfolio JSON file (or pipe the document via stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated ticker filter (defaults to the whole portfolio)
    #[arg(long)]
    pub tickers: Option<String>,
}

pub fn run_altman(args: AltmanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let provider = input::portfolio::load(args.input.as_deref())?;
    let tickers = input::portfolio::select_tickers(&provider, args.tickers.as_deref());

    let model = AltmanModel::new(&provider);
    let table = model.ratios_table(&tickers);
    Ok(serde_json::to_value(table)?)
}
