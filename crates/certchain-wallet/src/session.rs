//! tab-scoped wallet session persistence
//!
//! a single JSON record under one key. every mutation is a full replace or
//! clear, so concurrent readers always observe a whole session or none.
//! corrupted stored data is purged and treated as logged out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapter::WalletKind;
use crate::error::{Result, WalletError};

/// storage key for the wallet connection record
pub const SESSION_KEY: &str = "walletConnection";

/// authenticated wallet session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: String,
    pub wallet_type: WalletKind,
}

impl WalletSession {
    /// parse a stored record; a partial session counts as corruption
    pub fn parse(raw: &str) -> Result<Self> {
        let session: WalletSession =
            serde_json::from_str(raw).map_err(|_| WalletError::MalformedSession)?;
        if session.address.is_empty() {
            return Err(WalletError::MalformedSession);
        }
        Ok(session)
    }
}

/// key-value backend the session store writes through
///
/// a browser shell backs this with sessionStorage; tests and native shells
/// use the in-memory backend.
pub trait SessionBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// in-memory backend with tab-scoped semantics in a single process
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// session store owning the single wallet-connection key
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    /// read the current session; malformed data is purged and reads as absent
    pub fn get(&self) -> Option<WalletSession> {
        let raw = self.backend.read(SESSION_KEY)?;
        match WalletSession::parse(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("stored wallet session unusable, purging: {e}");
                self.clear();
                None
            }
        }
    }

    pub fn set(&self, session: &WalletSession) {
        match serde_json::to_string(session) {
            Ok(raw) => {
                self.backend.write(SESSION_KEY, &raw);
                debug!("wallet session stored for {}", session.wallet_type.label());
            }
            Err(e) => warn!("failed to serialize wallet session: {e}"),
        }
    }

    pub fn clear(&self) {
        self.backend.remove(SESSION_KEY);
        debug!("wallet session cleared");
    }

    pub fn is_valid(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WalletSession {
        WalletSession {
            address: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7".into(),
            wallet_type: WalletKind::Leather,
        }
    }

    #[test]
    fn test_round_trip() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get(), None);

        store.set(&session());
        assert_eq!(store.get(), Some(session()));
        assert!(store.is_valid());

        store.clear();
        assert_eq!(store.get(), None);
        assert!(!store.is_valid());
    }

    #[test]
    fn test_wire_format() {
        let raw = serde_json::to_string(&session()).unwrap();
        assert!(raw.contains("\"walletType\":\"leather\""));
        assert!(raw.contains("\"address\""));
    }

    #[test]
    fn test_parse_rejects_partial_session() {
        assert!(matches!(
            WalletSession::parse("{not json"),
            Err(WalletError::MalformedSession)
        ));
        assert!(matches!(
            WalletSession::parse(r#"{"address":"","walletType":"leather"}"#),
            Err(WalletError::MalformedSession)
        ));
    }

    #[test]
    fn test_malformed_data_is_purged() {
        let backend = Arc::new(MemoryBackend::default());
        backend.write(SESSION_KEY, "{not json");

        let store = SessionStore::new(backend.clone());
        assert_eq!(store.get(), None);
        assert_eq!(backend.read(SESSION_KEY), None);
    }

    #[test]
    fn test_empty_address_is_purged() {
        let backend = Arc::new(MemoryBackend::default());
        backend.write(SESSION_KEY, r#"{"address":"","walletType":"xverse"}"#);

        let store = SessionStore::new(backend.clone());
        assert_eq!(store.get(), None);
        assert_eq!(backend.read(SESSION_KEY), None);
    }
}
