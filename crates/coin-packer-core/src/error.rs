use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoinPackerError {
    #[error("Invalid container dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid item #{index}: {reason}")]
    InvalidItem { index: usize, reason: String },
    #[error("Unknown denomination: {0}")]
    UnknownDenomination(String),
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, CoinPackerError>;
