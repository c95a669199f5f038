//! wallet connection state machine
//!
//! drives adapter selection, session persistence and the connect/disconnect
//! lifecycle. local cleanup on disconnect is unconditional: logging out must
//! always succeed even when the remote sign-out fails.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::adapter::{WalletAdapter, WalletKind};
use crate::error::{Result, WalletError};
use crate::session::{SessionStore, WalletSession};

/// connection lifecycle states
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// explicit user confirmation gate before a remote disconnect is attempted
    ConfirmingDisconnect,
    Disconnecting,
}

/// tab lifecycle events that invalidate the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    TabClosed,
    TabHidden,
}

/// orchestrates adapters, the session store and the connection state
pub struct ConnectionController {
    adapters: Vec<Arc<dyn WalletAdapter>>,
    session: SessionStore,
    state: Arc<RwLock<ConnectionState>>,
}

impl ConnectionController {
    /// create a controller, restoring a stored session when one is present.
    /// restore is local only, no adapter call is made.
    pub fn new(adapters: Vec<Arc<dyn WalletAdapter>>, session: SessionStore) -> Self {
        let state = match session.get() {
            Some(restored) => {
                info!(
                    "restored {} wallet session for {}",
                    restored.wallet_type.label(),
                    restored.address
                );
                ConnectionState::Connected
            }
            None => ConnectionState::Disconnected,
        };
        Self {
            adapters,
            session,
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn adapter(&self, kind: WalletKind) -> Option<&Arc<dyn WalletAdapter>> {
        self.adapters.iter().find(|a| a.kind() == kind)
    }

    pub async fn state(&self) -> ConnectionState {
        self.state.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        matches!(
            *self.state.read().await,
            ConnectionState::Connected | ConnectionState::ConfirmingDisconnect
        )
    }

    /// address of the current session, if any
    pub fn address(&self) -> Option<String> {
        self.session.get().map(|s| s.address)
    }

    /// current session record, if any
    pub fn session(&self) -> Option<WalletSession> {
        self.session.get()
    }

    /// connect with the chosen wallet
    ///
    /// guarded on extension detection; on adapter failure the state returns
    /// to disconnected and nothing is persisted.
    pub async fn connect(&self, kind: WalletKind) -> Result<(String, bool)> {
        let adapter = self.adapter(kind).filter(|a| a.detect()).ok_or_else(|| {
            WalletError::AdapterUnavailable(format!(
                "{} wallet not detected, install the extension first",
                kind.label()
            ))
        })?;

        *self.state.write().await = ConnectionState::Connecting;
        info!("connecting {} wallet", kind.label());

        match adapter.connect().await {
            Ok(address) => {
                self.session.set(&WalletSession {
                    address: address.clone(),
                    wallet_type: kind,
                });
                *self.state.write().await = ConnectionState::Connected;
                info!("{} wallet connected as {}", kind.label(), address);
                Ok((address, true))
            }
            Err(e) => {
                *self.state.write().await = ConnectionState::Disconnected;
                warn!("{} wallet connection failed: {e}", kind.label());
                Err(e)
            }
        }
    }

    /// gate the connected -> disconnecting transition on user confirmation;
    /// returns whether the gate was armed
    pub async fn request_disconnect(&self) -> bool {
        let mut state = self.state.write().await;
        if *state == ConnectionState::Connected {
            *state = ConnectionState::ConfirmingDisconnect;
            true
        } else {
            false
        }
    }

    pub async fn cancel_disconnect(&self) {
        let mut state = self.state.write().await;
        if *state == ConnectionState::ConfirmingDisconnect {
            *state = ConnectionState::Connected;
        }
    }

    /// disconnect the current wallet
    ///
    /// the remote sign-out is best effort; local cleanup always runs and the
    /// result is always logged out.
    pub async fn disconnect(&self) -> (String, bool) {
        *self.state.write().await = ConnectionState::Disconnecting;

        if let Some(session) = self.session.get() {
            if let Some(adapter) = self.adapter(session.wallet_type) {
                adapter.disconnect().await;
            }
        }

        self.session.clear();
        *self.state.write().await = ConnectionState::Disconnected;
        info!("wallet disconnected");
        (String::new(), false)
    }

    /// drop straight to disconnected without touching the adapter, for
    /// recovering when a prior disconnect left an inconsistent error state
    pub async fn force_disconnect(&self) {
        self.session.clear();
        *self.state.write().await = ConnectionState::Disconnected;
        info!("wallet force-disconnected");
    }

    /// tab lifecycle events purge the session unconditionally
    pub async fn handle_lifecycle(&self, event: LifecycleEvent) {
        debug!("lifecycle event {event:?}, purging session");
        self.session.clear();
        *self.state.write().await = ConnectionState::Disconnected;
    }

    /// cloneable handle for the embedding shell to deliver lifecycle events
    /// without holding a reference to the controller
    pub fn lifecycle_handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            session: self.session.clone(),
            state: self.state.clone(),
        }
    }
}

/// delivers tab lifecycle events into the controller state
#[derive(Clone)]
pub struct LifecycleHandle {
    session: SessionStore,
    state: Arc<RwLock<ConnectionState>>,
}

impl LifecycleHandle {
    pub async fn notify(&self, event: LifecycleEvent) {
        debug!("lifecycle event {event:?}, purging session");
        self.session.clear();
        *self.state.write().await = ConnectionState::Disconnected;
    }
}
