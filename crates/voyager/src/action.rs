//! What each action sends and what it changes once confirmed.

use crate::client::{ChainClient, ReceiptSummary};
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, TxHash, U256, bytes};
use alloy_rpc_types::TransactionRequest;
use chrono::{DateTime, Utc};
use voyager_common::errors::ChainError;
use voyager_config::Config;
use voyager_state::{ActionKind, Event};

/// Creation code of the bundled mock contract.
pub const DEPLOYABLE_CONTRACT_BYTECODE: Bytes = bytes!(
    "6080604052348015600f57600080fd5b50603f80601d6000396000f3fe6080604052600080fdfea26469706673582212204c3f59e663a7590d96d7f0223e7f9e8a5b6e2f16a69074095a5c5c066738520864736f6c63430008120033"
);

/// ABI of the bundled mock contract. It has no functions.
pub const DEPLOYABLE_CONTRACT_ABI: &str = "[]";

/// Name the contract is submitted under for explorer verification.
pub const DEPLOYABLE_CONTRACT_NAME: &str = "VoyagerToken";

/// An action together with everything needed to build its transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionDescriptor {
    /// Self-transfer of `value` wei with `message` as UTF-8 calldata.
    Greet { message: String, value: U256 },
    /// Contract creation with `bytecode`.
    Deploy { bytecode: Bytes },
}

impl ActionDescriptor {
    pub fn greet(message: impl Into<String>, value: U256) -> Self {
        Self::Greet { message: message.into(), value }
    }

    /// The mock contract deployment.
    pub fn deploy() -> Self {
        Self::Deploy { bytecode: DEPLOYABLE_CONTRACT_BYTECODE }
    }

    /// Builds the descriptor for `kind` from the config.
    pub fn from_config(kind: ActionKind, config: &Config) -> eyre::Result<Self> {
        Ok(match kind {
            ActionKind::Greet => Self::greet(&config.greeting_message, config.greeting_value_wei()?),
            ActionKind::Deploy => Self::deploy(),
        })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Greet { .. } => ActionKind::Greet,
            Self::Deploy { .. } => ActionKind::Deploy,
        }
    }

    /// The transaction request sent from `from`.
    pub fn request(&self, from: Address) -> TransactionRequest {
        let request = TransactionRequest::default().with_from(from);
        match self {
            Self::Greet { message, value } => request
                .with_to(from)
                .with_value(*value)
                .with_input(Bytes::copy_from_slice(message.as_bytes())),
            Self::Deploy { bytecode } => request.with_deploy_code(bytecode.clone()),
        }
    }

    /// Submits the transaction through `client`.
    pub async fn submit<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        from: Address,
    ) -> Result<TxHash, ChainError> {
        match self {
            Self::Greet { .. } => client.send_transaction(self.request(from)).await,
            Self::Deploy { bytecode } => client.deploy_contract(from, bytecode.clone()).await,
        }
    }

    /// The state transitions applied once the transaction is confirmed.
    ///
    /// Both actions start their cooldown; the reducer advances the streak for greetings.
    pub fn on_confirmed(
        &self,
        receipt: &ReceiptSummary,
        chain_id: u64,
        at: DateTime<Utc>,
    ) -> [Event; 2] {
        let contract_address = match self {
            Self::Greet { .. } => None,
            Self::Deploy { .. } => receipt.contract_address,
        };
        [
            Event::TransactionConfirmed { hash: receipt.hash, contract_address },
            Event::ActionCompleted { action: self.kind(), chain_id, at },
        ]
    }
}
