//! Altman Z-Score bankruptcy prediction over a data provider.
//!
//! Five accounting ratios, fixed original weights:
//! `Z = 1.2*X1 + 1.4*X2 + 3.3*X3 + 0.6*X4 + 1.0*X5`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::{RiskModel, SkipDiagnostic};
use crate::provider::FinancialDataProvider;
use crate::types::Ticker;
use crate::CreditRiskError;
use crate::CreditRiskResult;

// ---------------------------------------------------------------------------
// Coefficients (original public-company Z-Score)
// ---------------------------------------------------------------------------

const COEFF_X1: Decimal = dec!(1.2);
const COEFF_X2: Decimal = dec!(1.4);
const COEFF_X3: Decimal = dec!(3.3);
const COEFF_X4: Decimal = dec!(0.6);
const COEFF_X5: Decimal = dec!(1.0);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The five dimensionless Altman ratios for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    /// Working capital / total assets
    pub x1: Decimal,
    /// Retained earnings / total assets
    pub x2: Decimal,
    /// EBIT / total assets
    pub x3: Decimal,
    /// Market equity / total liabilities
    pub x4: Decimal,
    /// Sales / total assets
    pub x5: Decimal,
}

impl RatioSet {
    /// Weighted sum of the five ratios.
    pub fn z_score(&self) -> Decimal {
        COEFF_X1 * self.x1
            + COEFF_X2 * self.x2
            + COEFF_X3 * self.x3
            + COEFF_X4 * self.x4
            + COEFF_X5 * self.x5
    }
}

/// One row of the ratios table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioRow {
    pub ticker: Ticker,
    pub x1: Decimal,
    pub x2: Decimal,
    pub x3: Decimal,
    pub x4: Decimal,
    pub x5: Decimal,
    pub z_score: Decimal,
}

/// Ratios for every ticker that could be computed, plus a diagnostic per
/// skipped ticker. Failed tickers are skipped, not nulled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatioTable {
    pub rows: Vec<RatioRow>,
    pub skipped: Vec<SkipDiagnostic>,
}

/// Ticker-to-Z mapping over a full batch. Unlike [`RatioTable`], every
/// requested ticker keeps an entry; failures are recorded as an absent
/// score plus a diagnostic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZScoreTable {
    pub rows: Vec<ZScoreRow>,
    pub skipped: Vec<SkipDiagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScoreRow {
    pub ticker: Ticker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Altman Z-Score model over a read-only data provider.
pub struct AltmanModel<'a, P: FinancialDataProvider> {
    provider: &'a P,
}

impl<'a, P: FinancialDataProvider> AltmanModel<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        AltmanModel { provider }
    }

    /// Compute the five ratios for one ticker.
    ///
    /// Fails on any missing field and on a zero denominator. A zero
    /// denominator is an explicit error, never a silent infinity.
    pub fn compute_ratios(&self, ticker: &Ticker) -> CreditRiskResult<RatioSet> {
        let p = self.provider;

        let total_assets = p.total_assets(ticker)?;
        let total_liabilities = p.total_liabilities(ticker)?;

        if total_assets.is_zero() {
            return Err(CreditRiskError::DivisionByZero {
                context: format!("{ticker}: ratios over total assets"),
            });
        }
        if total_liabilities.is_zero() {
            return Err(CreditRiskError::DivisionByZero {
                context: format!("{ticker}: X4 over total liabilities"),
            });
        }

        Ok(RatioSet {
            x1: p.working_capital(ticker)? / total_assets,
            x2: p.retained_earnings(ticker)? / total_assets,
            x3: p.ebit(ticker)? / total_assets,
            x4: p.market_equity(ticker)? / total_liabilities,
            x5: p.sales(ticker)? / total_assets,
        })
    }

    /// Z-Score for one ticker, propagating the underlying error.
    pub fn z_score(&self, ticker: &Ticker) -> CreditRiskResult<Decimal> {
        Ok(self.compute_ratios(ticker)?.z_score())
    }

    /// Ratio rows for a batch, skipping tickers that fail.
    pub fn ratios_table(&self, tickers: &[Ticker]) -> RatioTable {
        let mut table = RatioTable::default();
        for ticker in tickers {
            match self.compute_ratios(ticker) {
                Ok(ratios) => table.rows.push(RatioRow {
                    ticker: ticker.clone(),
                    z_score: ratios.z_score(),
                    x1: ratios.x1,
                    x2: ratios.x2,
                    x3: ratios.x3,
                    x4: ratios.x4,
                    x5: ratios.x5,
                }),
                Err(e) => table.skipped.push(SkipDiagnostic::new(ticker, e)),
            }
        }
        table
    }

    /// Ticker-to-Z mapping for a batch, keeping an entry per ticker.
    pub fn z_score_table(&self, tickers: &[Ticker]) -> ZScoreTable {
        let mut table = ZScoreTable::default();
        for ticker in tickers {
            match self.z_score(ticker) {
                Ok(z) => table.rows.push(ZScoreRow {
                    ticker: ticker.clone(),
                    z_score: Some(z),
                }),
                Err(e) => {
                    table.skipped.push(SkipDiagnostic::new(ticker, e));
                    table.rows.push(ZScoreRow {
                        ticker: ticker.clone(),
                        z_score: None,
                    });
                }
            }
        }
        table
    }
}

impl<'a, P: FinancialDataProvider> RiskModel for AltmanModel<'a, P> {
    type Score = Decimal;

    fn compute(&self, ticker: &Ticker) -> Option<Decimal> {
        self.z_score(ticker).ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CompanyFinancials, InMemoryProvider};
    use rust_decimal_macros::dec;

    /// Balanced mid-grade company: Z lands in the review band.
    fn sample_company() -> CompanyFinancials {
        CompanyFinancials {
            total_assets: Some(dec!(1_000)),
            total_liabilities: Some(dec!(600)),
            working_capital: Some(dec!(200)),
            retained_earnings: Some(dec!(150)),
            ebit: Some(dec!(120)),
            sales: Some(dec!(900)),
            market_equity: Some(dec!(500)),
            ..Default::default()
        }
    }

    fn provider_with(companies: Vec<(&str, CompanyFinancials)>) -> InMemoryProvider {
        companies
            .into_iter()
            .map(|(t, c)| (Ticker::new(t), c))
            .collect()
    }

    #[test]
    fn test_ratios_known_answer() {
        let provider = provider_with(vec![("VZ", sample_company())]);
        let model = AltmanModel::new(&provider);
        let ratios = model.compute_ratios(&Ticker::new("VZ")).unwrap();

        assert_eq!(ratios.x1, dec!(0.2));
        assert_eq!(ratios.x2, dec!(0.15));
        assert_eq!(ratios.x3, dec!(0.12));
        // 500 / 600 = 0.8333...
        assert_eq!(ratios.x4, dec!(500) / dec!(600));
        assert_eq!(ratios.x5, dec!(0.9));
    }

    #[test]
    fn test_z_score_matches_manual_weighted_sum() {
        let provider = provider_with(vec![("VZ", sample_company())]);
        let model = AltmanModel::new(&provider);
        let ticker = Ticker::new("VZ");

        let ratios = model.compute_ratios(&ticker).unwrap();
        let manual = dec!(1.2) * ratios.x1
            + dec!(1.4) * ratios.x2
            + dec!(3.3) * ratios.x3
            + dec!(0.6) * ratios.x4
            + dec!(1.0) * ratios.x5;

        assert_eq!(model.z_score(&ticker).unwrap(), manual);

        // Z = 0.24 + 0.21 + 0.396 + 0.5 + 0.9 = 2.246
        let z = model.z_score(&ticker).unwrap();
        assert!((z - dec!(2.246)).abs() < dec!(0.0001), "Z was {z}");
    }

    #[test]
    fn test_missing_field_propagates_from_single_call() {
        let mut company = sample_company();
        company.ebit = None;
        let provider = provider_with(vec![("BA", company)]);
        let model = AltmanModel::new(&provider);

        match model.z_score(&Ticker::new("BA")).unwrap_err() {
            CreditRiskError::MissingField { field, .. } => assert_eq!(field, "ebit"),
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_total_assets_raises() {
        let mut company = sample_company();
        company.total_assets = Some(Decimal::ZERO);
        let provider = provider_with(vec![("F", company)]);
        let model = AltmanModel::new(&provider);

        assert!(matches!(
            model.compute_ratios(&Ticker::new("F")).unwrap_err(),
            CreditRiskError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_zero_total_liabilities_raises() {
        let mut company = sample_company();
        company.total_liabilities = Some(Decimal::ZERO);
        let provider = provider_with(vec![("F", company)]);
        let model = AltmanModel::new(&provider);

        assert!(matches!(
            model.compute_ratios(&Ticker::new("F")).unwrap_err(),
            CreditRiskError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_compute_absorbs_failure() {
        let mut broken = sample_company();
        broken.sales = None;
        let provider = provider_with(vec![("F", broken)]);
        let model = AltmanModel::new(&provider);

        assert_eq!(model.compute(&Ticker::new("F")), None);
        assert!(model.compute(&Ticker::new("VZ")).is_none());
    }

    #[test]
    fn test_batch_isolation_one_bad_one_good() {
        let mut broken = sample_company();
        broken.retained_earnings = None;
        let provider = provider_with(vec![("VZ", sample_company()), ("F", broken)]);
        let model = AltmanModel::new(&provider);

        let table = model.ratios_table(provider.tickers());
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].ticker, Ticker::new("VZ"));
        assert_eq!(table.skipped.len(), 1);
        assert_eq!(table.skipped[0].ticker, Ticker::new("F"));
        assert!(table.skipped[0].reason.contains("retained_earnings"));
    }

    #[test]
    fn test_empty_batch_keeps_shape() {
        let provider = InMemoryProvider::new();
        let model = AltmanModel::new(&provider);
        let table = model.ratios_table(&[]);
        assert!(table.rows.is_empty());
        assert!(table.skipped.is_empty());
    }

    #[test]
    fn test_z_score_table_keeps_absent_entries() {
        let mut broken = sample_company();
        broken.market_equity = None;
        let provider = provider_with(vec![("VZ", sample_company()), ("F", broken)]);
        let model = AltmanModel::new(&provider);

        let table = model.z_score_table(provider.tickers());
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].z_score.is_some());
        assert!(table.rows[1].z_score.is_none());
        assert_eq!(table.skipped.len(), 1);
    }

    #[test]
    fn test_compute_all_preserves_order() {
        let provider = provider_with(vec![
            ("VZ", sample_company()),
            ("MA", sample_company()),
            ("BA", sample_company()),
        ]);
        let model = AltmanModel::new(&provider);
        let all = model.compute_all(provider.tickers());
        let order: Vec<&str> = all.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(order, vec!["VZ", "MA", "BA"]);
        assert!(all.iter().all(|(_, z)| z.is_some()));
    }

    #[test]
    fn test_negative_working_capital_allowed() {
        let mut company = sample_company();
        company.working_capital = Some(dec!(-100));
        let provider = provider_with(vec![("X", company)]);
        let model = AltmanModel::new(&provider);

        let ratios = model.compute_ratios(&Ticker::new("X")).unwrap();
        assert!(ratios.x1 < Decimal::ZERO);
    }
}
