//! Final credit decision from the joined Altman and Merton results.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::altman::ZScoreTable;
use crate::merton::{MertonRow, MertonTable};
use crate::model::SkipDiagnostic;
use crate::types::Ticker;

// Strict inequalities on every threshold: values exactly on a boundary
// fall through to Review.
const APPROVE_MIN_Z: Decimal = dec!(3.0);
const APPROVE_MAX_PD_PCT: f64 = 5.0;
const DENY_MAX_Z: Decimal = dec!(1.8);
const DENY_MIN_PD_PCT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditDecision {
    Approve,
    Deny,
    Review,
    InsufficientData,
}

impl fmt::Display for CreditDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "APPROVE"),
            Self::Deny => write!(f, "DENY"),
            Self::Review => write!(f, "REVIEW"),
            Self::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

/// Pure decision rule over a (Z-Score, PD%) pair.
pub fn credit_decision(
    z_score: Option<Decimal>,
    probability_of_default: Option<f64>,
) -> CreditDecision {
    let (z, pd) = match (z_score, probability_of_default) {
        (Some(z), Some(pd)) => (z, pd),
        _ => return CreditDecision::InsufficientData,
    };

    if z > APPROVE_MIN_Z && pd < APPROVE_MAX_PD_PCT {
        CreditDecision::Approve
    } else if z < DENY_MAX_Z || pd > DENY_MIN_PD_PCT {
        CreditDecision::Deny
    } else {
        CreditDecision::Review
    }
}

/// One row of the joined decision table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRow {
    pub ticker: Ticker,
    pub z_score: Decimal,
    pub distance_to_default: f64,
    pub probability_of_default: f64,
    pub decision: CreditDecision,
}

/// Decision table plus the diagnostics accumulated by both models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditReport {
    pub rows: Vec<CreditRow>,
    pub skipped: Vec<SkipDiagnostic>,
    pub warnings: Vec<String>,
}

/// Inner join of the Z-Score and Merton tables on ticker.
///
/// A ticker present in only one table is excluded from the decision rows
/// (its skip diagnostic still surfaces); it is not marked
/// `INSUFFICIENT_DATA`.
pub fn credit_report(z_table: &ZScoreTable, merton_table: &MertonTable) -> CreditReport {
    let merton_by_ticker: BTreeMap<&Ticker, &MertonRow> = merton_table
        .rows
        .iter()
        .map(|row| (&row.ticker, row))
        .collect();

    let mut report = CreditReport {
        skipped: z_table
            .skipped
            .iter()
            .chain(merton_table.skipped.iter())
            .cloned()
            .collect(),
        warnings: merton_table.warnings.clone(),
        ..Default::default()
    };

    for z_row in &z_table.rows {
        let Some(z) = z_row.z_score else { continue };
        let Some(merton) = merton_by_ticker.get(&z_row.ticker) else {
            continue;
        };
        report.rows.push(CreditRow {
            ticker: z_row.ticker.clone(),
            z_score: z,
            distance_to_default: merton.distance_to_default,
            probability_of_default: merton.probability_of_default,
            decision: credit_decision(Some(z), Some(merton.probability_of_default)),
        });
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
