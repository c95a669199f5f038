//! wallet adapters
//!
//! two vendors with incompatible response shapes, modeled as a closed set of
//! adapters behind one interface. the shape differences are normalized here
//! and never leak past this module.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{Result, WalletError};
use crate::provider::{RpcResponse, WalletProvider};

/// supported wallet vendors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Leather,
    Xverse,
}

impl WalletKind {
    pub fn label(&self) -> &'static str {
        match self {
            WalletKind::Leather => "Leather",
            WalletKind::Xverse => "Xverse",
        }
    }
}

/// common adapter surface: detect the extension, connect, sign out
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// whether the extension is present
    fn detect(&self) -> bool;

    /// request addresses and normalize to a single address string
    async fn connect(&self) -> Result<String>;

    /// best-effort remote sign-out, must not fail
    async fn disconnect(&self);
}

/// rejection-style errors are a distinct user-facing category
fn is_rejection(err: &WalletError) -> bool {
    matches!(err, WalletError::Provider(msg) if msg.contains("rejected"))
}

fn nonempty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// an entry is either a bare address string or an `{address}` object
fn address_from_entry(entry: &Value) -> Option<String> {
    if let Some(s) = entry.as_str() {
        return nonempty(s);
    }
    nonempty(entry.get("address")?.as_str()?)
}

/// normalize a leather response across its known shapes, in fixed priority
/// order: result array (strings or address objects), `{addresses: [...]}`
/// wrapper, direct `{address}`, bare string.
///
/// the order mirrors observed wallet behavior across extension versions and
/// is kept as the de-facto contract; it is not verified to be exhaustive.
pub fn normalize_leather_address(response: &RpcResponse) -> Option<String> {
    let result = response.result.as_ref()?;

    if let Some(items) = result.as_array() {
        return address_from_entry(items.first()?);
    }

    if let Some(addresses) = result.get("addresses").and_then(Value::as_array) {
        return address_from_entry(addresses.first()?);
    }

    if let Some(addr) = result.get("address") {
        return nonempty(addr.as_str()?);
    }

    nonempty(result.as_str()?)
}

/// leather wallet adapter
pub struct LeatherAdapter {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl LeatherAdapter {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl WalletAdapter for LeatherAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Leather
    }

    fn detect(&self) -> bool {
        self.provider.is_some()
    }

    async fn connect(&self) -> Result<String> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            WalletError::AdapterUnavailable(
                "Leather wallet not found, install the extension first".into(),
            )
        })?;

        let response = match provider.request("getAddresses", None).await {
            Ok(response) => response,
            Err(e) if is_rejection(&e) => return Err(WalletError::UserRejected),
            Err(e) => {
                debug!("getAddresses failed ({e}), falling back to stacks_getAccounts");
                provider
                    .request("stacks_getAccounts", None)
                    .await
                    .map_err(|fallback| {
                        warn!("both leather connect methods failed: {fallback}");
                        WalletError::AdapterUnavailable(
                            "unable to reach Leather, ensure the wallet is unlocked".into(),
                        )
                    })?
            }
        };

        normalize_leather_address(&response).ok_or(WalletError::NoAddress)
    }

    async fn disconnect(&self) {
        let Some(provider) = self.provider.as_ref() else {
            return;
        };
        if let Err(e) = provider.request("signOut", Some(json!({}))).await {
            warn!("leather sign-out failed: {e}");
        }
    }
}

/// xverse wallet adapter
///
/// xverse has no remote sign-out, disconnect is local-state-only.
pub struct XverseAdapter {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl XverseAdapter {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl WalletAdapter for XverseAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Xverse
    }

    fn detect(&self) -> bool {
        self.provider.is_some()
    }

    async fn connect(&self) -> Result<String> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            WalletError::AdapterUnavailable(
                "Xverse wallet not found, install the extension first".into(),
            )
        })?;

        let response = match provider.request("getAddresses", Some(json!({}))).await {
            Ok(response) => response,
            Err(e) if is_rejection(&e) => return Err(WalletError::UserRejected),
            Err(e) => return Err(e),
        };

        response
            .result
            .as_ref()
            .and_then(|r| r.get("addresses"))
            .and_then(Value::as_array)
            .and_then(|a| a.first())
            .and_then(|entry| entry.get("address"))
            .and_then(Value::as_str)
            .and_then(nonempty)
            .ok_or(WalletError::NoAddress)
    }

    async fn disconnect(&self) {}
}
