use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreditRiskError {
    #[error("{ticker}: required field '{field}' is unavailable")]
    MissingField { ticker: String, field: &'static str },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CreditRiskError {
    fn from(e: serde_json::Error) -> Self {
        CreditRiskError::Serialization(e.to_string())
    }
}
