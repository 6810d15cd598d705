use thiserror::Error;

#[derive(Error, Debug)]
pub enum SavingsError {
    #[error("card '{card_id}' has no 'default' reward rate")]
    MissingDefaultRate { card_id: String },

    #[error("card '{card_id}' has an invalid rate for '{category}' (rates must be finite and >= 0)")]
    InvalidRate { card_id: String, category: String },

    #[error("transaction '{transaction_id}' has an invalid amount (amounts must be finite and >= 0)")]
    InvalidAmount { transaction_id: String },

    #[error("transaction '{transaction_id}' has an unparseable date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { transaction_id: String, value: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SavingsError>;
