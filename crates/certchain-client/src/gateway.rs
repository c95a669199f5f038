//! contract call gateway
//!
//! builds normalized positional call options and executes them against a
//! transport, returning uniform envelopes for read-only and state-changing
//! calls. transport failures never escape this boundary as errors, they
//! become failure envelopes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::error::{ClientError, Result};

/// positional contract function argument
///
/// serializes untagged so an options payload reproduces the positional JSON
/// the contract layer expects: strings, unsigned integers, booleans, null
/// and flat lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContractArg {
    Bool(bool),
    UInt(u64),
    Str(String),
    List(Vec<ContractArg>),
    Null,
}

impl From<&str> for ContractArg {
    fn from(value: &str) -> Self {
        ContractArg::Str(value.to_string())
    }
}

impl From<String> for ContractArg {
    fn from(value: String) -> Self {
        ContractArg::Str(value)
    }
}

impl From<u64> for ContractArg {
    fn from(value: u64) -> Self {
        ContractArg::UInt(value)
    }
}

impl From<bool> for ContractArg {
    fn from(value: bool) -> Self {
        ContractArg::Bool(value)
    }
}

impl From<Vec<String>> for ContractArg {
    fn from(values: Vec<String>) -> Self {
        ContractArg::List(values.into_iter().map(ContractArg::Str).collect())
    }
}

impl ContractArg {
    /// clarity-style optional: some becomes a single-element list, none
    /// becomes null
    pub fn optional(value: Option<String>) -> Self {
        match value {
            Some(v) => ContractArg::List(vec![ContractArg::Str(v)]),
            None => ContractArg::Null,
        }
    }
}

/// normalized request for one contract call, built fresh per call
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallOptions {
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    pub function_args: Vec<ContractArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_key: Option<String>,
}

/// terminal result of a read-only call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadResult {
    pub success: bool,
    pub result: Option<Value>,
}

impl ReadResult {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
        }
    }

    pub fn fail() -> Self {
        Self {
            success: false,
            result: None,
        }
    }
}

/// terminal result of a state-changing call
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionResult {
    pub fn ok(tx_id: impl Into<String>) -> Self {
        Self {
            success: true,
            tx_id: Some(tx_id.into()),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_id: None,
            error: Some(error.into()),
        }
    }
}

/// transport executing normalized calls against a network endpoint
#[async_trait]
pub trait ContractTransport: Send + Sync {
    /// execute a read-only query, returning the raw result payload
    async fn read_only(&self, options: &ContractCallOptions) -> Result<Value>;

    /// submit a state-changing transaction, returning its txid
    async fn submit(&self, options: &ContractCallOptions) -> Result<String>;
}

/// read queries come back quickly, submissions sit in the mempool
const READ_TIMEOUT: Duration = Duration::from_secs(10);
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest transport against a stacks api node
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.stacks_api.clone(),
        }
    }
}

#[async_trait]
impl ContractTransport for HttpTransport {
    async fn read_only(&self, options: &ContractCallOptions) -> Result<Value> {
        let url = format!(
            "{}/v2/contracts/call-read/{}/{}/{}",
            self.base_url, options.contract_address, options.contract_name, options.function_name
        );

        let response = self
            .client
            .post(&url)
            .timeout(READ_TIMEOUT)
            .json(options)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Network(format!(
                "read-only call returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn submit(&self, options: &ContractCallOptions) -> Result<String> {
        let url = format!("{}/v2/transactions", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(SUBMIT_TIMEOUT)
            .json(options)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Network(format!(
                "transaction submission returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        body.get("txid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::Network("transaction response carried no txid".into()))
    }
}

/// uniform entry point for contract calls
#[derive(Clone)]
pub struct ContractGateway {
    transport: Arc<dyn ContractTransport>,
}

impl ContractGateway {
    pub fn new(transport: Arc<dyn ContractTransport>) -> Self {
        Self { transport }
    }

    pub fn http(config: &NetworkConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(config)))
    }

    /// read-only call; transport failures become a failure envelope
    pub async fn call_read_only(&self, options: &ContractCallOptions) -> ReadResult {
        debug!("calling read-only function {}", options.function_name);
        match self.transport.read_only(options).await {
            Ok(result) => ReadResult::ok(result),
            Err(e) => {
                warn!("read-only call {} failed: {e}", options.function_name);
                ReadResult::fail()
            }
        }
    }

    /// state-changing call; transport failures become a failure envelope
    pub async fn call_public(&self, options: &ContractCallOptions) -> TransactionResult {
        debug!("submitting public function {}", options.function_name);
        match self.transport.submit(options).await {
            Ok(tx_id) => TransactionResult::ok(tx_id),
            Err(e) => {
                warn!("submission of {} failed: {e}", options.function_name);
                TransactionResult::fail(e.to_string())
            }
        }
    }
}

/// fetch a transaction envelope from the api
pub async fn fetch_transaction(config: &NetworkConfig, tx_id: &str) -> Result<Value> {
    let url = format!("{}/extended/v1/tx/{}", config.stacks_api, tx_id);
    let response = reqwest::Client::new()
        .get(&url)
        .timeout(READ_TIMEOUT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ClientError::Network(format!(
            "failed to fetch transaction: {}",
            response.status()
        )));
    }

    Ok(response.json().await?)
}
