//! request-style wallet extension surface
//!
//! wallet extensions expose a single `request(method, params)` entry point
//! returning a loosely typed envelope. the trait is the injection seam that
//! stands in for the extension global, so adapters run against mocks in
//! tests and against a real browser bridge in a shell.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// loosely typed response envelope returned by wallet extensions
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl RpcResponse {
    pub fn from_result(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }
}

/// wallet extension entry point
///
/// a missing provider (extension not installed) is modeled as the absence of
/// an implementation, not as a request failure.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<RpcResponse>;
}
