//! Wallet sessions: a signer bound to the RPC endpoint of the active network.

use crate::{WalletSigner, error::SessionError};
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use voyager_common::errors::ChainError;
use voyager_config::{NetworkDescriptor, RpcEndpoints};

/// The wallet capabilities the rest of voyager consumes.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Connects the wallet to the active network.
    async fn connect(&mut self) -> Result<(), SessionError>;

    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    /// Address of the connected account.
    fn address(&self) -> Option<Address>;

    /// Chain id reported by the connected endpoint.
    fn chain_id(&self) -> Option<u64>;

    /// Whether [`switch_chain`](Self::switch_chain) can be used.
    fn can_switch_chain(&self) -> bool;

    async fn switch_chain(&mut self, network: &'static NetworkDescriptor)
    -> Result<(), SessionError>;

    fn signer(&self) -> Option<&WalletSigner>;
}

struct Connection {
    provider: DynProvider,
    chain_id: u64,
}

/// A [`WalletSession`] backed by a local signer and a JSON-RPC endpoint.
///
/// The endpoint comes from the network registry, unless overridden in `rpc_endpoints` or pinned
/// with `--rpc-url`. A pinned endpoint cannot be switched.
pub struct RpcSession {
    signer: Option<WalletSigner>,
    network: &'static NetworkDescriptor,
    endpoints: RpcEndpoints,
    pinned_rpc: Option<String>,
    connection: Option<Connection>,
}

impl RpcSession {
    pub fn new(
        signer: Option<WalletSigner>,
        network: &'static NetworkDescriptor,
        endpoints: RpcEndpoints,
    ) -> Self {
        Self { signer, network, endpoints, pinned_rpc: None, connection: None }
    }

    /// Uses `url` for every request instead of the network's endpoint.
    pub fn with_pinned_rpc(mut self, url: impl Into<String>) -> Self {
        self.pinned_rpc = Some(url.into());
        self
    }

    /// The network the session targets.
    pub fn network(&self) -> &'static NetworkDescriptor {
        self.network
    }

    /// Provider with the signer attached, available once connected.
    pub fn provider(&self) -> Option<&DynProvider> {
        self.connection.as_ref().map(|conn| &conn.provider)
    }

    /// The endpoint used for `network`.
    pub fn rpc_url_for(&self, network: &'static NetworkDescriptor) -> Result<String, SessionError> {
        match &self.pinned_rpc {
            Some(url) => Ok(url.clone()),
            None => Ok(self.endpoints.resolve_for(network)?.into_owned()),
        }
    }

    async fn open(&self, network: &'static NetworkDescriptor) -> Result<Connection, SessionError> {
        let signer = self.signer.clone().ok_or(SessionError::NoWallet)?;
        let url = self.rpc_url_for(network)?;
        debug!(%url, network = network.name, "connecting");

        let provider = ProviderBuilder::new()
            .wallet(signer.into_wallet())
            .connect(&url)
            .await
            .map_err(ChainError::from)?
            .erased();
        let chain_id = provider.get_chain_id().await.map_err(ChainError::from)?;
        Ok(Connection { provider, chain_id })
    }
}

#[async_trait]
impl WalletSession for RpcSession {
    async fn connect(&mut self) -> Result<(), SessionError> {
        let conn = self.open(self.network).await?;
        if conn.chain_id != self.network.chain_id {
            warn!(
                expected = self.network.chain_id,
                actual = conn.chain_id,
                "endpoint is on a different chain"
            );
        }
        self.connection = Some(conn);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.connection = None;
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn address(&self) -> Option<Address> {
        self.connection.as_ref()?;
        self.signer.as_ref().map(WalletSigner::address)
    }

    fn chain_id(&self) -> Option<u64> {
        self.connection.as_ref().map(|conn| conn.chain_id)
    }

    fn can_switch_chain(&self) -> bool {
        self.pinned_rpc.is_none()
    }

    async fn switch_chain(
        &mut self,
        network: &'static NetworkDescriptor,
    ) -> Result<(), SessionError> {
        if !self.can_switch_chain() {
            return Err(SessionError::SwitchUnsupported);
        }

        if let Some(conn) = &self.connection
            && conn.chain_id == network.chain_id
            && self.network.chain_id == network.chain_id
        {
            return Ok(());
        }

        if self.connection.is_some() {
            let conn = self.open(network).await?;
            if conn.chain_id != network.chain_id {
                return Err(SessionError::ChainMismatch {
                    expected: network.chain_id,
                    actual: conn.chain_id,
                });
            }
            self.connection = Some(conn);
        }

        self.network = network;
        Ok(())
    }

    fn signer(&self) -> Option<&WalletSigner> {
        self.signer.as_ref()
    }
}
