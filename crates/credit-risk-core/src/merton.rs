//! Merton structural default model over a data provider.
//!
//! Equity value plus total debt proxies firm value; annualized equity
//! volatility proxies asset volatility. Under the log-normal diffusion
//! assumption:
//!
//! `DD = (ln(V/D) + (rf + sigma^2/2)*T) / (sigma*sqrt(T))`
//! `PD = (1 - N(DD)) * 100`

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;

use crate::model::{RiskModel, SkipDiagnostic};
use crate::provider::FinancialDataProvider;
use crate::types::Ticker;
use crate::volatility::{annualized_volatility, LOW_CONFIDENCE_OBSERVATIONS};
use crate::CreditRiskError;
use crate::CreditRiskResult;

pub const DEFAULT_RISK_FREE_RATE: f64 = 0.03;
pub const DEFAULT_HORIZON_YEARS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Immutable model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MertonConfig {
    /// Assumed drift of firm asset value (annualized, decimal).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Horizon in years over which default is measured.
    #[serde(default = "default_horizon_years")]
    pub horizon_years: f64,
}

fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

fn default_horizon_years() -> f64 {
    DEFAULT_HORIZON_YEARS
}

impl Default for MertonConfig {
    fn default() -> Self {
        MertonConfig {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Per-ticker Merton score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MertonScore {
    pub distance_to_default: f64,
    /// Percentage in [0, 100].
    pub probability_of_default: f64,
}

/// One row of the Merton results table. DD is rounded to 4 decimals for
/// reporting; PD is carried at full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MertonRow {
    pub ticker: Ticker,
    pub distance_to_default: f64,
    pub probability_of_default: f64,
}

/// Batch result. Shaped identically whether zero or all tickers succeed,
/// so callers never special-case an empty run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MertonTable {
    pub rows: Vec<MertonRow>,
    pub skipped: Vec<SkipDiagnostic>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Merton model over a read-only data provider.
pub struct MertonModel<'a, P: FinancialDataProvider> {
    provider: &'a P,
    config: MertonConfig,
}

impl<'a, P: FinancialDataProvider> MertonModel<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self::with_config(provider, MertonConfig::default())
    }

    pub fn with_config(provider: &'a P, config: MertonConfig) -> Self {
        MertonModel { provider, config }
    }

    pub fn config(&self) -> MertonConfig {
        self.config
    }

    /// Firm value proxy: market equity plus total debt.
    pub fn firm_value(&self, ticker: &Ticker) -> CreditRiskResult<f64> {
        let equity = self.provider.market_equity(ticker)?;
        let debt = self.provider.total_debt(ticker)?;
        to_f64(equity + debt, "market_equity + total_debt")
    }

    /// Default barrier: total debt.
    pub fn default_point(&self, ticker: &Ticker) -> CreditRiskResult<f64> {
        to_f64(self.provider.total_debt(ticker)?, "total_debt")
    }

    /// Annualized equity volatility from the ticker's price history.
    pub fn volatility(&self, ticker: &Ticker) -> CreditRiskResult<f64> {
        annualized_volatility(self.provider.price_series(ticker)?)
    }

    /// Distance to default in asset-volatility standard deviations.
    ///
    /// Rejects non-positive debt, firm value, volatility, or horizon
    /// explicitly; none of them may reach `ln` or the division as a NaN.
    pub fn distance_to_default(&self, ticker: &Ticker) -> CreditRiskResult<f64> {
        let v = self.firm_value(ticker)?;
        let d = self.default_point(ticker)?;
        let sigma = self.volatility(ticker)?;
        let t = self.config.horizon_years;

        if d <= 0.0 {
            return Err(CreditRiskError::InvalidInput {
                field: "total_debt".into(),
                reason: format!("{ticker}: default point must be positive, got {d}."),
            });
        }
        if v <= 0.0 {
            return Err(CreditRiskError::InvalidInput {
                field: "firm_value".into(),
                reason: format!("{ticker}: firm value must be positive, got {v}."),
            });
        }
        if sigma <= 0.0 {
            return Err(CreditRiskError::InvalidInput {
                field: "equity_volatility".into(),
                reason: format!("{ticker}: volatility must be positive, got {sigma}."),
            });
        }
        if t <= 0.0 {
            return Err(CreditRiskError::InvalidInput {
                field: "horizon_years".into(),
                reason: format!("Horizon must be positive, got {t}."),
            });
        }

        let rf = self.config.risk_free_rate;
        Ok(((v / d).ln() + (rf + sigma * sigma / 2.0) * t) / (sigma * t.sqrt()))
    }

    /// Probability of default as a percentage in [0, 100].
    pub fn probability_of_default(&self, ticker: &Ticker) -> CreditRiskResult<f64> {
        Ok(default_probability_pct(self.distance_to_default(ticker)?))
    }

    /// Merton rows for a batch, skipping tickers that fail. A short price
    /// history behind a reported row produces a low-confidence warning,
    /// not a skip; skipped tickers emit no warning.
    pub fn merton_table(&self, tickers: &[Ticker]) -> MertonTable {
        let mut table = MertonTable::default();
        for ticker in tickers {
            match self.distance_to_default(ticker) {
                Ok(dd) => {
                    if let Ok(series) = self.provider.price_series(ticker) {
                        if series.len() < LOW_CONFIDENCE_OBSERVATIONS {
                            table.warnings.push(format!(
                                "{ticker}: volatility estimated from only {} price observations",
                                series.len()
                            ));
                        }
                    }
                    table.rows.push(MertonRow {
                        ticker: ticker.clone(),
                        distance_to_default: round4(dd),
                        probability_of_default: default_probability_pct(dd),
                    });
                }
                Err(e) => table.skipped.push(SkipDiagnostic::new(ticker, e)),
            }
        }
        table
    }
}

impl<'a, P: FinancialDataProvider> RiskModel for MertonModel<'a, P> {
    type Score = MertonScore;

    fn compute(&self, ticker: &Ticker) -> Option<MertonScore> {
        let dd = self.distance_to_default(ticker).ok()?;
        Some(MertonScore {
            distance_to_default: dd,
            probability_of_default: default_probability_pct(dd),
        })
    }
}

// ---------------------------------------------------------------------------
// Distribution helpers
// ---------------------------------------------------------------------------

/// Standard normal CDF via the complementary error function. Accurate well
/// past six decimals across [-10, 10] and saturates cleanly at the tails.
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// `(1 - N(dd)) * 100`, clamped to the reportable percentage range.
pub fn default_probability_pct(dd: f64) -> f64 {
    let tail = 0.5 * erfc(dd / std::f64::consts::SQRT_2);
    (tail * 100.0).clamp(0.0, 100.0)
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn to_f64(value: rust_decimal::Decimal, context: &str) -> CreditRiskResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| CreditRiskError::InvalidInput {
            field: context.to_string(),
            reason: format!("{value} is not representable as f64."),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
