use serde::{Deserialize, Serialize};

use crate::types::Ticker;

/// Capability shared by all risk models: score one ticker, or report that
/// no score could be produced.
///
/// `compute` absorbs every per-ticker failure into `None`. One bad ticker
/// must never abort a batch, so the provided `compute_all` is a plain loop
/// with no cross-ticker dependency.
pub trait RiskModel {
    type Score;

    fn compute(&self, ticker: &Ticker) -> Option<Self::Score>;

    fn compute_all(&self, tickers: &[Ticker]) -> Vec<(Ticker, Option<Self::Score>)> {
        tickers
            .iter()
            .map(|t| (t.clone(), self.compute(t)))
            .collect()
    }
}

/// Why a ticker was dropped from a batch result table. Returned alongside
/// the rows so callers and tests can inspect exactly what was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDiagnostic {
    pub ticker: Ticker,
    pub reason: String,
}

impl SkipDiagnostic {
    pub fn new(ticker: &Ticker, reason: impl ToString) -> Self {
        SkipDiagnostic {
            ticker: ticker.clone(),
            reason: reason.to_string(),
        }
    }
}
