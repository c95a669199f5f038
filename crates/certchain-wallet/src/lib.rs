//! certchain wallet connection core
//!
//! discovers wallet extensions, normalizes their heterogeneous response
//! shapes into a single address, persists the resulting session for the
//! lifetime of a tab and drives the connect/disconnect state machine.
//!
//! the browser-side surfaces (extension globals, sessionStorage) are modeled
//! as narrow traits so the core runs and tests without a real browser shell.

pub mod adapter;
pub mod controller;
pub mod error;
pub mod provider;
pub mod session;

pub use adapter::{LeatherAdapter, WalletAdapter, WalletKind, XverseAdapter};
pub use controller::{ConnectionController, ConnectionState, LifecycleEvent, LifecycleHandle};
pub use error::{Result, WalletError};
pub use provider::{RpcResponse, WalletProvider};
pub use session::{MemoryBackend, SessionBackend, SessionStore, WalletSession, SESSION_KEY};
