//! In-memory chain client and wallet session.

use crate::client::{ChainClient, ReceiptSummary};
use alloy_primitives::{Address, B256, Bytes, TxHash, U256, address};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::{sync::Mutex, time::Duration};
use voyager_common::errors::{ChainError, ChainErrorKind};
use voyager_config::NetworkDescriptor;
use voyager_wallets::{SessionError, WalletSession, WalletSigner};

#[derive(Clone, Debug)]
pub enum ReceiptBehavior {
    Success { contract_address: Option<Address> },
    Reverted,
    Fail(ChainError),
}

pub struct MockClient {
    balance: Option<U256>,
    balance_delay: Duration,
    send_error: Option<ChainError>,
    receipt: ReceiptBehavior,
    nonce: Mutex<u8>,
    pub sent: Mutex<Vec<TransactionRequest>>,
    pub deployed: Mutex<Vec<Bytes>>,
}

impl MockClient {
    pub const SENDER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    pub fn new() -> Self {
        Self {
            balance: Some(U256::ZERO),
            balance_delay: Duration::ZERO,
            send_error: None,
            receipt: ReceiptBehavior::Success { contract_address: None },
            nonce: Mutex::new(0),
            sent: Mutex::default(),
            deployed: Mutex::default(),
        }
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn failing_balance(mut self) -> Self {
        self.balance = None;
        self
    }

    pub fn with_balance_delay(mut self, delay: Duration) -> Self {
        self.balance_delay = delay;
        self
    }

    pub fn rejecting(mut self, err: ChainError) -> Self {
        self.send_error = Some(err);
        self
    }

    pub fn with_receipt(mut self, receipt: ReceiptBehavior) -> Self {
        self.receipt = receipt;
        self
    }

    /// Makes the first submitted transaction hash `Self::hash(first)`.
    ///
    /// Clients sharing one activity log need disjoint hashes.
    pub fn starting_at(self, first: u8) -> Self {
        *self.nonce.lock().unwrap() = first - 1;
        self
    }

    /// Hash of the `n`th submitted transaction, starting at 1.
    pub fn hash(n: u8) -> TxHash {
        B256::repeat_byte(n)
    }

    fn next_hash(&self) -> TxHash {
        let mut nonce = self.nonce.lock().unwrap();
        *nonce += 1;
        Self::hash(*nonce)
    }

    pub fn submitted(&self) -> usize {
        self.sent.lock().unwrap().len() + self.deployed.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainClient for MockClient {
    async fn get_balance(&self, _address: Address) -> Result<U256, ChainError> {
        if !self.balance_delay.is_zero() {
            tokio::time::sleep(self.balance_delay).await;
        }
        self.balance.ok_or_else(|| ChainError::new(ChainErrorKind::Network, "connection refused"))
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, ChainError> {
        if let Some(err) = &self.send_error {
            return Err(err.clone());
        }
        self.sent.lock().unwrap().push(request);
        Ok(self.next_hash())
    }

    async fn deploy_contract(&self, _from: Address, bytecode: Bytes) -> Result<TxHash, ChainError> {
        if let Some(err) = &self.send_error {
            return Err(err.clone());
        }
        self.deployed.lock().unwrap().push(bytecode);
        Ok(self.next_hash())
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<ReceiptSummary, ChainError> {
        match &self.receipt {
            ReceiptBehavior::Success { contract_address } => Ok(ReceiptSummary {
                hash,
                success: true,
                contract_address: *contract_address,
                block_number: Some(1),
            }),
            ReceiptBehavior::Reverted => {
                Ok(ReceiptSummary { hash, success: false, contract_address: None, block_number: Some(1) })
            }
            ReceiptBehavior::Fail(err) => Err(err.clone()),
        }
    }
}

pub struct MockSession {
    pub address: Option<Address>,
    pub chain_id: Option<u64>,
    pub switchable: bool,
    pub switch_error: Option<ChainError>,
}

impl MockSession {
    pub fn connected(chain_id: u64) -> Self {
        Self {
            address: Some(MockClient::SENDER),
            chain_id: Some(chain_id),
            switchable: true,
            switch_error: None,
        }
    }

    pub fn disconnected() -> Self {
        Self { address: None, chain_id: None, switchable: true, switch_error: None }
    }
}

#[async_trait]
impl WalletSession for MockSession {
    async fn connect(&mut self) -> Result<(), SessionError> {
        Err(SessionError::NoWallet)
    }

    fn disconnect(&mut self) {
        self.address = None;
        self.chain_id = None;
    }

    fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    fn address(&self) -> Option<Address> {
        self.address
    }

    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    fn can_switch_chain(&self) -> bool {
        self.switchable
    }

    async fn switch_chain(
        &mut self,
        network: &'static NetworkDescriptor,
    ) -> Result<(), SessionError> {
        if let Some(err) = &self.switch_error {
            return Err(err.clone().into());
        }
        if self.is_connected() {
            self.chain_id = Some(network.chain_id);
        }
        Ok(())
    }

    fn signer(&self) -> Option<&WalletSigner> {
        None
    }
}
