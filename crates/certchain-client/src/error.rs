//! error types for the certchain client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("contract call failed: {0}")]
    CallFailed(String),

    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Wallet(#[from] certchain_wallet::WalletError),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}
