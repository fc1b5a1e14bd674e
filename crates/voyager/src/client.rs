//! The chain client capability used by the executor.

use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use voyager_common::{RECEIPT_TIMEOUT, errors::ChainError};

/// What the executor needs to know about a mined transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub hash: TxHash,
    /// `false` if the transaction reverted.
    pub success: bool,
    pub contract_address: Option<Address>,
    pub block_number: Option<u64>,
}

/// Balance queries, transaction submission and receipt waiting against one chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError>;

    /// Signs and submits `request`, returning once the node accepted it.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, ChainError>;

    /// Submits a contract creation transaction carrying `bytecode`.
    async fn deploy_contract(&self, from: Address, bytecode: Bytes) -> Result<TxHash, ChainError> {
        let request = TransactionRequest::default().with_from(from).with_deploy_code(bytecode);
        self.send_transaction(request).await
    }

    /// Waits until `hash` is mined.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<ReceiptSummary, ChainError>;
}

/// [`ChainClient`] over an alloy provider that has the wallet filler attached.
#[derive(Clone)]
pub struct AlloyClient {
    provider: DynProvider,
    receipt_timeout: Duration,
}

impl AlloyClient {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider, receipt_timeout: RECEIPT_TIMEOUT }
    }

    pub fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

#[async_trait]
impl ChainClient for AlloyClient {
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, ChainError> {
        let pending = self.provider.send_transaction(request).await?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<ReceiptSummary, ChainError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await?;
        Ok(ReceiptSummary {
            hash,
            success: receipt.status(),
            contract_address: receipt.contract_address(),
            block_number: receipt.block_number(),
        })
    }
}
