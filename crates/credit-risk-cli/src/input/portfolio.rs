//! Portfolio document: the JSON shape the CLI feeds to the in-memory
//! data provider.
//!
//! ```json
//! {
//!   "companies": [
//!     {
//!       "ticker": "VZ",
//!       "total_assets": "1000",
//!       "total_liabilities": "600",
//!       "working_capital": "200",
//!       "retained_earnings": "150",
//!       "ebit": "120",
//!       "sales": "900",
//!       "market_equity": "500",
//!       "total_debt": "300",
//!       "prices": [{ "date": "2024-01-02", "close": 101.5 }]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::io::Read;

use credit_risk_core::provider::{CompanyFinancials, FinancialDataProvider, InMemoryProvider};
use credit_risk_core::types::Ticker;

use crate::input;

#[derive(Debug, Deserialize)]
pub struct Portfolio {
    pub companies: Vec<CompanyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyEntry {
    pub ticker: Ticker,
    #[serde(flatten)]
    pub financials: CompanyFinancials,
}

impl Portfolio {
    pub fn into_provider(self) -> InMemoryProvider {
        self.companies
            .into_iter()
            .map(|c| (c.ticker, c.financials))
            .collect()
    }
}

/// Load a portfolio from `--input <path>` or piped stdin.
pub fn load(path: Option<&str>) -> Result<InMemoryProvider, Box<dyn std::error::Error>> {
    let portfolio: Portfolio = if let Some(path) = path {
        input::file::read_json(path)?
    } else if let Some(portfolio) = read_piped()? {
        portfolio
    } else {
        return Err("--input <portfolio.json> is required (or pipe the document via stdin)".into());
    };
    Ok(portfolio.into_provider())
}

/// Portfolio document piped through stdin, or `None` when stdin is an
/// interactive terminal (or the pipe is empty).
fn read_piped() -> Result<Option<Portfolio>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let document = buffer.trim();
    if document.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(document)?))
}

/// Ticker universe for a run: the `--tickers` filter when given, otherwise
/// every ticker in the portfolio, in portfolio order.
pub fn select_tickers(provider: &InMemoryProvider, filter: Option<&str>) -> Vec<Ticker> {
    match filter {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Ticker::new)
            .collect(),
        None => provider.tickers().to_vec(),
    }
}
