//! error types for wallet connection

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet unavailable: {0}")]
    AdapterUnavailable(String),

    #[error("connection was rejected in the wallet")]
    UserRejected,

    #[error("wallet returned no usable address")]
    NoAddress,

    #[error("wallet request failed: {0}")]
    Provider(String),

    #[error("stored wallet session is malformed")]
    MalformedSession,
}

pub type Result<T> = std::result::Result<T, WalletError>;
