//! certchain client
//!
//! contract-call gateway and certificate operations for the certchain
//! certificate-nft contract, plus the caller-facing application core that
//! ties wallet connection to the domain operations.
//!
//! the transport behind the gateway and the wallet providers behind the
//! connection controller are both traits, so the whole stack runs against
//! mocks in tests and against reqwest plus real extensions in a shell.

pub mod app;
pub mod certificate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ops;
pub mod stx;
pub mod validate;

pub use app::CertchainApp;
pub use certificate::{
    Certificate, CertificateData, CertificateExtraData, MintResult, RawCertificateData,
};
pub use config::{ContractConfig, Network, NetworkConfig, StacksProvider, DEFAULT_NETWORK};
pub use error::{ClientError, Result};
pub use gateway::{
    fetch_transaction, ContractArg, ContractCallOptions, ContractGateway, ContractTransport,
    HttpTransport, ReadResult, TransactionResult,
};
pub use ops::CertificateOps;
pub use validate::{is_valid_date, validate_certificate_data};

pub use certchain_wallet as wallet;
