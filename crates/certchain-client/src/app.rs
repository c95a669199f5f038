//! caller-facing application core
//!
//! owns the connection controller and the certificate operations, exposing
//! the surface the form, checker and gallery views call into. a restored
//! session is turned back into a connected provider snapshot on startup.

use tokio::sync::RwLock;
use tracing::info;

use certchain_wallet::{ConnectionController, WalletKind};

use crate::certificate::{Certificate, CertificateData, MintResult};
use crate::config::{NetworkConfig, StacksProvider};
use crate::error::Result;
use crate::gateway::{ContractGateway, TransactionResult};
use crate::ops::CertificateOps;

pub struct CertchainApp {
    controller: ConnectionController,
    config: NetworkConfig,
    gateway: ContractGateway,
    ops: RwLock<CertificateOps>,
}

impl CertchainApp {
    pub fn new(
        controller: ConnectionController,
        config: NetworkConfig,
        gateway: ContractGateway,
    ) -> Self {
        let provider = match controller.session() {
            Some(session) => StacksProvider::connect(session.address, &config),
            None => StacksProvider::read_only(&config),
        };
        let ops = CertificateOps::new(gateway.clone(), provider);
        Self {
            controller,
            config,
            gateway,
            ops: RwLock::new(ops),
        }
    }

    /// build with the reqwest transport against the configured network
    pub fn http(controller: ConnectionController, config: NetworkConfig) -> Self {
        let gateway = ContractGateway::http(&config);
        Self::new(controller, config, gateway)
    }

    pub fn controller(&self) -> &ConnectionController {
        &self.controller
    }

    /// connect the chosen wallet and snapshot the provider
    pub async fn connect(&self, kind: WalletKind) -> Result<(String, bool)> {
        let (address, connected) = self.controller.connect(kind).await?;
        let provider = StacksProvider::connect(address.clone(), &self.config);
        info!(
            "connected to stacks {} via contract {}.{}",
            provider.network, provider.contract_address, provider.contract_name
        );
        *self.ops.write().await = CertificateOps::new(self.gateway.clone(), provider);
        Ok((address, connected))
    }

    /// disconnect and drop back to a read-only snapshot
    pub async fn disconnect(&self) -> (String, bool) {
        let result = self.controller.disconnect().await;
        *self.ops.write().await = CertificateOps::new(
            self.gateway.clone(),
            StacksProvider::read_only(&self.config),
        );
        result
    }

    /// full certificate lookup by token id
    pub async fn check_certificate(&self, token_id: u64) -> Option<Certificate> {
        self.ops.read().await.check_certificate(token_id).await
    }

    /// current owner of a token
    pub async fn verify_ownership(&self, token_id: u64) -> Option<String> {
        self.ops.read().await.get_owner(token_id).await
    }

    /// validate and mint a certificate nft
    pub async fn mint(&self, data: &CertificateData) -> MintResult {
        if !self.controller.is_connected().await {
            return MintResult::fail("Please connect your wallet first");
        }
        self.ops.read().await.mint(data).await
    }

    /// freeze certificate metadata
    pub async fn verify(&self, token_id: u64) -> TransactionResult {
        self.ops.read().await.verify(token_id).await
    }

    /// certificate balance of the connected wallet, 0 when disconnected
    pub async fn balance(&self) -> u64 {
        let ops = self.ops.read().await;
        let address = ops.provider().address.clone();
        if address.is_empty() {
            return 0;
        }
        ops.get_balance(&address).await
    }
}
