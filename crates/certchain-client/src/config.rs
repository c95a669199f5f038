//! network and contract configuration
//!
//! static per-network lookup for api endpoints, the explorer and the
//! deployed contract coordinates. the gateway consumes only the contract
//! address and name plus the active network, never this table itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// target stacks network
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        };
        write!(f, "{name}")
    }
}

/// deployed contract coordinates
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub address: String,
    pub name: String,
}

/// per-network endpoints and contracts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub stacks_api: String,
    pub explorer_url: String,
    pub network: Network,
    pub certchain: ContractConfig,
    pub certchain_util: ContractConfig,
}

impl NetworkConfig {
    /// hiro testnet with the current contract deployment
    pub fn testnet() -> Self {
        Self {
            stacks_api: "https://api.testnet.hiro.so".into(),
            explorer_url: "https://explorer.hiro.so".into(),
            network: Network::Testnet,
            certchain: ContractConfig {
                address: "STWP05KMRQCK2S63Q78BA8HDZ84KYGGGXGYNME2A".into(),
                name: "certchain".into(),
            },
            certchain_util: ContractConfig {
                address: "STWP05KMRQCK2S63Q78BA8HDZ84KYGGGXGYNME2A".into(),
                name: "certchain-util".into(),
            },
        }
    }

    /// local clarinet devnet
    pub fn devnet() -> Self {
        Self {
            stacks_api: "http://localhost:3999".into(),
            explorer_url: "http://localhost:8000".into(),
            network: Network::Devnet,
            certchain: ContractConfig {
                address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".into(),
                name: "certchain".into(),
            },
            certchain_util: ContractConfig {
                address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".into(),
                name: "certchain-util".into(),
            },
        }
    }

    /// mainnet endpoints; contract addresses stay empty until the contracts
    /// are deployed there
    pub fn mainnet() -> Self {
        Self {
            stacks_api: "https://api.hiro.so".into(),
            explorer_url: "https://explorer.hiro.so".into(),
            network: Network::Mainnet,
            certchain: ContractConfig {
                address: String::new(),
                name: "certchain".into(),
            },
            certchain_util: ContractConfig {
                address: String::new(),
                name: "certchain-util".into(),
            },
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
            Network::Devnet => Self::devnet(),
        }
    }

    /// explorer link for a transaction
    pub fn explorer_tx_url(&self, tx_id: &str) -> String {
        format!("{}/txid/{}", self.explorer_url, tx_id)
    }
}

/// network used when nothing else is configured
pub const DEFAULT_NETWORK: Network = Network::Testnet;

/// immutable snapshot of one connected session against one network
///
/// rebuilt from the wallet session and the static config on each page load,
/// never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StacksProvider {
    pub address: String,
    pub network: Network,
    pub connected: bool,
    pub contract_address: String,
    pub contract_name: String,
}

impl StacksProvider {
    /// snapshot a successful connection
    pub fn connect(address: impl Into<String>, config: &NetworkConfig) -> Self {
        Self {
            address: address.into(),
            network: config.network,
            connected: true,
            contract_address: config.certchain.address.clone(),
            contract_name: config.certchain.name.clone(),
        }
    }

    /// snapshot with no wallet attached, for read-only lookups
    pub fn read_only(config: &NetworkConfig) -> Self {
        Self {
            address: String::new(),
            network: config.network,
            connected: false,
            contract_address: config.certchain.address.clone(),
            contract_name: config.certchain.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_lookup() {
        assert_eq!(NetworkConfig::for_network(Network::Testnet).network, Network::Testnet);
        assert_eq!(
            NetworkConfig::for_network(Network::Devnet).stacks_api,
            "http://localhost:3999"
        );
        assert!(NetworkConfig::for_network(Network::Mainnet)
            .certchain
            .address
            .is_empty());
    }

    #[test]
    fn test_explorer_tx_url() {
        let config = NetworkConfig::testnet();
        assert_eq!(
            config.explorer_tx_url("0xabc"),
            "https://explorer.hiro.so/txid/0xabc"
        );
    }

    #[test]
    fn test_provider_snapshot() {
        let config = NetworkConfig::testnet();
        let provider = StacksProvider::connect("SP123", &config);
        assert!(provider.connected);
        assert_eq!(provider.contract_name, "certchain");
        assert_eq!(provider.network, Network::Testnet);

        let read_only = StacksProvider::read_only(&config);
        assert!(!read_only.connected);
        assert!(read_only.address.is_empty());
    }

    #[test]
    fn test_network_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Network::Devnet).unwrap(), "\"devnet\"");
    }
}
