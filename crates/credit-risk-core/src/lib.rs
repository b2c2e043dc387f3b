pub mod altman;
pub mod decision;
pub mod error;
pub mod merton;
pub mod model;
pub mod provider;
pub mod types;
pub mod volatility;

pub use error::CreditRiskError;
pub use types::*;

/// Standard result type for all credit-risk operations
pub type CreditRiskResult<T> = Result<T, CreditRiskError>;
