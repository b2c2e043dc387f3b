//! Equity volatility from historical prices.
//!
//! Daily log returns, annualized with the fixed 252 trading-day convention:
//! `sigma = std(ln(P[i] / P[i-1])) * sqrt(252)`.

use crate::error::CreditRiskError;
use crate::types::PriceSeries;
use crate::CreditRiskResult;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Below this many price observations a volatility estimate is flagged as
/// low confidence by the batch layers. The hard minimum stays at 2.
pub const LOW_CONFIDENCE_OBSERVATIONS: usize = 20;

/// Daily log returns from consecutive closes.
///
/// Requires at least 2 observations; non-positive prices are rejected
/// because the log return is undefined.
pub fn log_returns(closes: &[f64]) -> CreditRiskResult<Vec<f64>> {
    if closes.len() < 2 {
        return Err(CreditRiskError::InsufficientData(format!(
            "{} price observation(s); need at least 2 to form a return",
            closes.len()
        )));
    }
    if let Some(bad) = closes.iter().find(|c| **c <= 0.0 || !c.is_finite()) {
        return Err(CreditRiskError::InvalidInput {
            field: "close".into(),
            reason: format!("Non-positive or non-finite closing price {bad}."),
        });
    }
    Ok(closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Annualized standard deviation of daily log returns.
pub fn annualized_volatility(series: &PriceSeries) -> CreditRiskResult<f64> {
    let closes: Vec<f64> = series.closes().collect();
    let returns = log_returns(&closes)?;
    Ok(sample_std_dev(&returns) * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Sample standard deviation (n - 1 denominator). A single return carries
/// no dispersion information, so it yields 0 rather than NaN.
fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: start + chrono::Days::new(i as u64),
                    close,
                })
                .collect(),
        )
    }

    #[test]
    fn test_constant_prices_zero_volatility() {
        let s = series(&[100.0; 30]);
        assert_eq!(annualized_volatility(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_single_observation_insufficient() {
        let s = series(&[100.0]);
        assert!(matches!(
            annualized_volatility(&s).unwrap_err(),
            CreditRiskError::InsufficientData(_)
        ));
    }

    #[test]
    fn test_empty_series_insufficient() {
        let s = series(&[]);
        assert!(matches!(
            annualized_volatility(&s).unwrap_err(),
            CreditRiskError::InsufficientData(_)
        ));
    }

    #[test]
    fn test_two_points_zero_dispersion() {
        // One return, no dispersion: sigma is 0, not NaN
        let s = series(&[100.0, 105.0]);
        assert_eq!(annualized_volatility(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let s = series(&[100.0, 0.0, 101.0]);
        assert!(matches!(
            annualized_volatility(&s).unwrap_err(),
            CreditRiskError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_log_returns_known_values() {
        let returns = log_returns(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - (1.1_f64).ln()).abs() < 1e-12);
        assert!((returns[1] - (0.9_f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_alternating_series_annualization() {
        // Alternating +r/-r log returns have a known sample deviation
        let closes: Vec<f64> = (0..21)
            .map(|i| if i % 2 == 0 { 100.0 } else { 102.0 })
            .collect();
        let s = series(&closes);
        let vol = annualized_volatility(&s).unwrap();

        let r = (1.02_f64).ln();
        let returns: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { r } else { -r }).collect();
        let expected = sample_std_dev(&returns) * 252.0_f64.sqrt();
        assert!((vol - expected).abs() < 1e-12);
        assert!(vol > 0.0);
    }
}
