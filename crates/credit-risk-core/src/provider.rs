//! Data-provider contract the risk models read from.
//!
//! Models never mutate provider-owned data; every accessor either returns a
//! value or a `MissingField` error, so an absent field is always
//! distinguishable from a legitimate zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CreditRiskError;
use crate::types::{Money, PriceSeries, Ticker};
use crate::CreditRiskResult;

/// Read-only access to per-company financial data.
pub trait FinancialDataProvider {
    /// The ordered ticker universe configured for batch operations.
    fn tickers(&self) -> &[Ticker];

    fn total_assets(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn total_liabilities(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn working_capital(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn retained_earnings(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn ebit(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn sales(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn market_equity(&self, ticker: &Ticker) -> CreditRiskResult<Money>;
    fn total_debt(&self, ticker: &Ticker) -> CreditRiskResult<Money>;

    /// Historical closing prices, used only to derive equity volatility.
    fn price_series(&self, ticker: &Ticker) -> CreditRiskResult<&PriceSeries>;
}

/// Raw financial fields for one company. Every field is optional: data
/// vendors routinely omit line items, and absence must propagate as a
/// per-ticker failure rather than a silent zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyFinancials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<Money>,
    /// Direct working-capital figure. When absent it is derived from
    /// `current_assets - current_liabilities`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_capital: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_liabilities: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_earnings: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebit: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_equity: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<Money>,
    #[serde(default, skip_serializing_if = "PriceSeries::is_empty")]
    pub prices: PriceSeries,
}

impl CompanyFinancials {
    fn working_capital(&self) -> Option<Money> {
        self.working_capital
            .or_else(|| match (self.current_assets, self.current_liabilities) {
                (Some(ca), Some(cl)) => Some(ca - cl),
                _ => None,
            })
    }
}

/// In-memory provider over a ticker-keyed map. Backs the CLI (portfolio
/// documents) and tests; a market-data client can implement the same trait.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    tickers: Vec<Ticker>,
    companies: BTreeMap<Ticker, CompanyFinancials>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a company. Insertion order defines the batch order.
    pub fn insert(&mut self, ticker: Ticker, financials: CompanyFinancials) {
        if !self.companies.contains_key(&ticker) {
            self.tickers.push(ticker.clone());
        }
        self.companies.insert(ticker, financials);
    }

    fn company(&self, ticker: &Ticker) -> CreditRiskResult<&CompanyFinancials> {
        self.companies
            .get(ticker)
            .ok_or_else(|| CreditRiskError::MissingField {
                ticker: ticker.to_string(),
                field: "financial statements",
            })
    }

    fn field(
        &self,
        ticker: &Ticker,
        field: &'static str,
        value: Option<Money>,
    ) -> CreditRiskResult<Money> {
        value.ok_or_else(|| CreditRiskError::MissingField {
            ticker: ticker.to_string(),
            field,
        })
    }
}

impl FromIterator<(Ticker, CompanyFinancials)> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = (Ticker, CompanyFinancials)>>(iter: I) -> Self {
        let mut provider = InMemoryProvider::new();
        for (ticker, financials) in iter {
            provider.insert(ticker, financials);
        }
        provider
    }
}

impl FinancialDataProvider for InMemoryProvider {
    fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    fn total_assets(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(ticker, "total_assets", self.company(ticker)?.total_assets)
    }

    fn total_liabilities(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(
            ticker,
            "total_liabilities",
            self.company(ticker)?.total_liabilities,
        )
    }

    fn working_capital(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(
            ticker,
            "working_capital",
            self.company(ticker)?.working_capital(),
        )
    }

    fn retained_earnings(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(
            ticker,
            "retained_earnings",
            self.company(ticker)?.retained_earnings,
        )
    }

    fn ebit(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(ticker, "ebit", self.company(ticker)?.ebit)
    }

    fn sales(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(ticker, "sales", self.company(ticker)?.sales)
    }

    fn market_equity(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(ticker, "market_equity", self.company(ticker)?.market_equity)
    }

    fn total_debt(&self, ticker: &Ticker) -> CreditRiskResult<Money> {
        self.field(ticker, "total_debt", self.company(ticker)?.total_debt)
    }

    fn price_series(&self, ticker: &Ticker) -> CreditRiskResult<&PriceSeries> {
        let company = self.company(ticker)?;
        if company.prices.is_empty() {
            return Err(CreditRiskError::MissingField {
                ticker: ticker.to_string(),
                field: "price history",
            });
        }
        Ok(&company.prices)
    }
}
