//! Runs a single chain action from validation to settlement.

use crate::{
    action::ActionDescriptor,
    balance::refresh_balance,
    client::ChainClient,
    error::ActionError,
};
use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use std::{fmt, time::Duration};
use voyager_common::{BALANCE_TIMEOUT, errors::ChainError};
use voyager_config::{NetworkDescriptor, NetworkRegistry};
use voyager_state::{Event, Store, TransactionRecord, TxStatus, WalletState};
use voyager_wallets::WalletSession;

/// Where an execution currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    AwaitingReceipt,
    Settled(TxStatus),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Validating => f.write_str("validating"),
            Self::Submitting => f.write_str("submitting"),
            Self::AwaitingReceipt => f.write_str("awaiting receipt"),
            Self::Settled(status) => write!(f, "settled ({status})"),
        }
    }
}

type PhaseHook = Box<dyn FnMut(Phase, Option<&TransactionRecord>) + Send>;

/// Drives one action at a time through
/// `Idle -> Validating -> Submitting -> AwaitingReceipt -> Settled`.
///
/// Validation failures return to `Idle` without touching the store. Once a transaction hash
/// exists the action is recorded as pending and always settles as confirmed or failed.
pub struct ActionExecutor {
    registry: NetworkRegistry,
    balance_timeout: Duration,
    phase: Phase,
    on_phase: Option<PhaseHook>,
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new(NetworkRegistry::builtin())
    }
}

impl fmt::Debug for ActionExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionExecutor")
            .field("balance_timeout", &self.balance_timeout)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl ActionExecutor {
    pub fn new(registry: NetworkRegistry) -> Self {
        Self { registry, balance_timeout: BALANCE_TIMEOUT, phase: Phase::Idle, on_phase: None }
    }

    pub fn with_balance_timeout(mut self, timeout: Duration) -> Self {
        self.balance_timeout = timeout;
        self
    }

    /// Calls `hook` on every phase change. The record is set from `AwaitingReceipt` on.
    pub fn on_phase(
        mut self,
        hook: impl FnMut(Phase, Option<&TransactionRecord>) + Send + 'static,
    ) -> Self {
        self.on_phase = Some(Box::new(hook));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Executes `action` with `now` as the submission and completion time.
    ///
    /// Returns the settled activity record.
    pub async fn execute<C, S>(
        &mut self,
        action: &ActionDescriptor,
        client: &C,
        session: &S,
        store: &mut Store,
        now: DateTime<Utc>,
    ) -> Result<TransactionRecord, ActionError>
    where
        C: ChainClient + ?Sized,
        S: WalletSession + ?Sized,
    {
        let kind = action.kind();
        self.enter(Phase::Validating, None);
        let (from, network) = match self.validate(action, session, store, now) {
            Ok(ok) => ok,
            Err(err) => {
                debug!(action = %kind, %err, "validation failed");
                self.enter(Phase::Idle, None);
                return Err(err);
            }
        };

        self.enter(Phase::Submitting, None);
        let hash = match action.submit(client, from).await {
            Ok(hash) => hash,
            Err(err) => {
                warn!(action = %kind, kind = %err.kind, %err, "submission failed");
                self.enter(Phase::Idle, None);
                return Err(err.into());
            }
        };
        info!(action = %kind, %hash, network = network.name, "submitted");

        let record =
            TransactionRecord::pending(hash, kind, network.name, network.explorer_url, now);
        store.dispatch(Event::TransactionSubmitted(record.clone()))?;
        self.enter(Phase::AwaitingReceipt, Some(&record));

        let receipt = match client.wait_for_receipt(hash).await {
            Ok(receipt) if receipt.success => Ok(receipt),
            Ok(receipt) => Err(ChainError::reverted(format!(
                "transaction reverted in block {}",
                receipt.block_number.map_or_else(|| "?".to_string(), |n| n.to_string())
            ))),
            Err(err) => Err(err),
        };

        match receipt {
            Ok(receipt) => {
                for event in action.on_confirmed(&receipt, network.chain_id, now) {
                    store.dispatch(event)?;
                }
                let settled = self.settled(store, &record);
                info!(%hash, block = ?receipt.block_number, "confirmed");
                self.enter(Phase::Settled(TxStatus::Confirmed), Some(&settled));

                let balance = refresh_balance(client, from, self.balance_timeout).await;
                store.dispatch(Event::BalanceRefreshed(balance))?;
                Ok(settled)
            }
            Err(err) => {
                warn!(%hash, kind = %err.kind, %err, "transaction failed");
                store.dispatch(Event::TransactionFailed { hash })?;
                let settled = self.settled(store, &record);
                self.enter(Phase::Settled(TxStatus::Failed), Some(&settled));
                Err(err.into())
            }
        }
    }

    fn validate<S: WalletSession + ?Sized>(
        &self,
        action: &ActionDescriptor,
        session: &S,
        store: &Store,
        now: DateTime<Utc>,
    ) -> Result<(Address, &'static NetworkDescriptor), ActionError> {
        let (Some(from), Some(chain_id)) = (session.address(), session.chain_id()) else {
            return Err(ActionError::not_connected());
        };
        if !session.is_connected() {
            return Err(ActionError::not_connected());
        }

        let network =
            self.registry.find(chain_id).ok_or_else(|| ActionError::unknown_chain(chain_id))?;

        if store.state().cooldowns.is_on_cooldown(action.kind(), chain_id, now) {
            return Err(ActionError::cooldown(network.name));
        }

        Ok((from, network))
    }

    fn settled(&self, store: &Store, record: &TransactionRecord) -> TransactionRecord {
        store.state().transactions.get(&record.hash).cloned().unwrap_or_else(|| record.clone())
    }

    fn enter(&mut self, phase: Phase, record: Option<&TransactionRecord>) {
        trace!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
        if let Some(hook) = &mut self.on_phase {
            hook(phase, record);
        }
    }
}

/// Reports the session's connection to the store.
pub fn sync_wallet<S: WalletSession + ?Sized>(session: &S, store: &mut Store) {
    let wallet = match (session.address(), session.chain_id()) {
        (Some(address), Some(chain_id)) if session.is_connected() => {
            WalletState::connected(address, chain_id)
        }
        _ => WalletState::disconnected(),
    };
    if store.state().wallet.address != wallet.address
        || store.state().wallet.chain_id != wallet.chain_id
        || store.state().wallet.connected != wallet.connected
    {
        if let Err(err) = store.dispatch(Event::WalletUpdated(wallet)) {
            warn!(%err, "failed to record wallet state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ActionErrorKind, VerificationPackage, VerifyField,
        test_utils::{MockClient, MockSession, ReceiptBehavior},
    };
    use alloy_primitives::{U256, address};
    use std::sync::{Arc, Mutex};
    use voyager_common::errors::ChainErrorKind;
    use voyager_state::{ActionKind, AppState, StateDir, StreakState};

    const SEPOLIA: u64 = 11155111;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn greet() -> ActionDescriptor {
        ActionDescriptor::greet("GM Voyager!", U256::from(10_000_000_000_000u64))
    }

    fn store() -> Store {
        Store::ephemeral(AppState::default())
    }

    #[tokio::test]
    async fn greeting_confirms_and_starts_cooldown() {
        let t = at("2024-08-01T10:00:00Z");
        let client = MockClient::new().with_balance(U256::from(2_000_000_000_000_000_000u128));
        let session = MockSession::connected(SEPOLIA);
        let mut store = store();

        let phases = Arc::new(Mutex::new(Vec::new()));
        let seen = phases.clone();
        let mut executor =
            ActionExecutor::default().on_phase(move |phase, _| seen.lock().unwrap().push(phase));

        let record = executor.execute(&greet(), &client, &session, &mut store, t).await.unwrap();

        assert_eq!(record.status, TxStatus::Confirmed);
        assert_eq!(record.hash, MockClient::hash(1));
        assert_eq!(record.network_name, "Sepolia");
        assert_eq!(record.explorer_url, "https://sepolia.etherscan.io");
        assert_eq!(
            record.tx_url(),
            format!("https://sepolia.etherscan.io/tx/{:#x}", MockClient::hash(1))
        );

        let state = store.state();
        assert!(state.cooldowns.is_on_cooldown(ActionKind::Greet, SEPOLIA, t));
        assert!(!state.cooldowns.is_on_cooldown(ActionKind::Deploy, SEPOLIA, t));
        assert_eq!(state.streak, StreakState { count: 1, last_greet_at: Some(t) });
        assert_eq!(state.wallet.balance_display, "2.0000");

        assert_eq!(
            *phases.lock().unwrap(),
            vec![
                Phase::Validating,
                Phase::Submitting,
                Phase::AwaitingReceipt,
                Phase::Settled(TxStatus::Confirmed),
            ]
        );
        assert_eq!(executor.phase(), Phase::Settled(TxStatus::Confirmed));
    }

    #[tokio::test]
    async fn second_greeting_same_day_is_rejected() {
        let client = MockClient::new();
        let session = MockSession::connected(SEPOLIA);
        let mut store = store();
        let mut executor = ActionExecutor::default();

        executor
            .execute(&greet(), &client, &session, &mut store, at("2024-08-01T00:05:00Z"))
            .await
            .unwrap();

        let err = executor
            .execute(&greet(), &client, &session, &mut store, at("2024-08-01T23:55:00Z"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::CooldownActive);
        assert_eq!(err.message, "Daily interaction limit reached for Sepolia.");
        assert!(err.is_precondition());
        assert_eq!(executor.phase(), Phase::Idle);
        assert_eq!(store.state().transactions.len(), 1);
        assert_eq!(client.submitted(), 1);

        // a new UTC day lifts the cooldown
        executor
            .execute(&greet(), &client, &session, &mut store, at("2024-08-02T00:00:01Z"))
            .await
            .unwrap();
        assert_eq!(store.state().streak.count, 2);
    }

    #[tokio::test]
    async fn cooldown_is_per_chain_and_action() {
        let t = at("2024-08-01T12:00:00Z");
        let mut store = store();
        let mut executor = ActionExecutor::default();

        let sepolia = MockClient::new();
        executor
            .execute(&greet(), &sepolia, &MockSession::connected(SEPOLIA), &mut store, t)
            .await
            .unwrap();

        let fuji = MockClient::new().starting_at(10);
        executor
            .execute(&greet(), &fuji, &MockSession::connected(43113), &mut store, t)
            .await
            .unwrap();

        executor
            .execute(
                &ActionDescriptor::deploy(),
                &sepolia,
                &MockSession::connected(SEPOLIA),
                &mut store,
                t,
            )
            .await
            .unwrap();

        assert_eq!(store.state().transactions.len(), 3);
        // a greeting on a second chain the same day does not advance the streak again
        assert_eq!(store.state().streak.count, 1);
    }

    #[tokio::test]
    async fn disconnected_wallet() {
        let client = MockClient::new();
        let mut store = store();
        let err = ActionExecutor::default()
            .execute(&greet(), &client, &MockSession::disconnected(), &mut store, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::NotConnected);
        assert_eq!(err.to_string(), "Connect wallet first.");
        assert!(store.state().transactions.is_empty());
        assert_eq!(client.submitted(), 0);
    }

    #[tokio::test]
    async fn unknown_chain() {
        let client = MockClient::new();
        let mut store = store();
        let err = ActionExecutor::default()
            .execute(&greet(), &client, &MockSession::connected(31337), &mut store, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::UnknownChain);
        assert!(err.message.contains("31337"));
        assert_eq!(client.submitted(), 0);
    }

    #[tokio::test]
    async fn rejected_signature_leaves_no_record() {
        let client = MockClient::new()
            .rejecting(ChainError::new(ChainErrorKind::UserRejected, "user rejected transaction"));
        let mut store = store();
        let mut executor = ActionExecutor::default();

        let err = executor
            .execute(&greet(), &client, &MockSession::connected(SEPOLIA), &mut store, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::Chain(ChainErrorKind::UserRejected));
        assert_eq!(err.message, "user rejected transaction");
        assert_eq!(executor.phase(), Phase::Idle);
        assert!(store.state().transactions.is_empty());
        assert!(store.state().cooldowns.is_empty());
    }

    #[tokio::test]
    async fn revert_marks_record_failed() {
        let t = at("2024-08-01T10:00:00Z");
        let client = MockClient::new().with_receipt(ReceiptBehavior::Reverted);
        let mut store = store();
        let mut executor = ActionExecutor::default();

        let err = executor
            .execute(&greet(), &client, &MockSession::connected(SEPOLIA), &mut store, t)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::Chain(ChainErrorKind::Reverted));
        assert_eq!(executor.phase(), Phase::Settled(TxStatus::Failed));

        let state = store.state();
        assert_eq!(state.transactions.get(&MockClient::hash(1)).unwrap().status, TxStatus::Failed);
        assert!(!state.cooldowns.is_on_cooldown(ActionKind::Greet, SEPOLIA, t));
        assert_eq!(state.streak, StreakState::default());
    }

    #[tokio::test]
    async fn receipt_timeout_marks_record_failed() {
        let client = MockClient::new().with_receipt(ReceiptBehavior::Fail(ChainError::new(
            ChainErrorKind::Timeout,
            "timed out waiting for the transaction to be confirmed",
        )));
        let mut store = store();

        let err = ActionExecutor::default()
            .execute(&greet(), &client, &MockSession::connected(SEPOLIA), &mut store, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind.chain(), Some(ChainErrorKind::Timeout));
        assert_eq!(store.state().transactions.pending().count(), 0);
        assert_eq!(
            store.state().transactions.get(&MockClient::hash(1)).unwrap().status,
            TxStatus::Failed
        );
    }

    #[tokio::test]
    async fn deploy_records_contract_address() {
        let contract = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let client = MockClient::new()
            .with_receipt(ReceiptBehavior::Success { contract_address: Some(contract) });
        let mut store = store();

        let record = ActionExecutor::default()
            .execute(
                &ActionDescriptor::deploy(),
                &client,
                &MockSession::connected(84532),
                &mut store,
                Utc::now(),
            )
            .await
            .unwrap();

        assert_eq!(record.action, ActionKind::Deploy);
        assert_eq!(record.deployed_contract_address, Some(contract));
        assert!(record.is_verifiable());
        assert_eq!(client.deployed.lock().unwrap().len(), 1);
        assert_eq!(store.state().streak.count, 0);
    }

    #[tokio::test]
    async fn confirmed_deploy_feeds_verification() {
        let contract = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let client = MockClient::new()
            .with_receipt(ReceiptBehavior::Success { contract_address: Some(contract) });
        let registry = NetworkRegistry::builtin();
        let mut store = store();

        let record = ActionExecutor::new(registry)
            .execute(
                &ActionDescriptor::deploy(),
                &client,
                &MockSession::connected(84532),
                &mut store,
                Utc::now(),
            )
            .await
            .unwrap();

        let package =
            VerificationPackage::from_log(&store.state().transactions, &record.hash, &registry)
                .unwrap();
        assert_eq!(package.address, contract);
        assert_eq!(package.network_name, "Base Sepolia");
        assert_eq!(
            package.field(VerifyField::Url),
            format!("https://sepolia.basescan.org/address/{contract}#code")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_balance_after_confirmation() {
        let client = MockClient::new().with_balance_delay(Duration::from_secs(60));
        let mut store = store();

        let record = ActionExecutor::default()
            .execute(&greet(), &client, &MockSession::connected(SEPOLIA), &mut store, Utc::now())
            .await
            .unwrap();
        assert_eq!(record.status, TxStatus::Confirmed);
        assert_eq!(store.state().wallet.balance_display, "???");
    }

    #[test]
    fn syncs_wallet_state() {
        let mut store = store();
        sync_wallet(&MockSession::connected(SEPOLIA), &mut store);
        assert_eq!(store.state().wallet, WalletState::connected(MockClient::SENDER, SEPOLIA));

        sync_wallet(&MockSession::disconnected(), &mut store);
        assert!(!store.state().wallet.connected);
    }

    #[tokio::test]
    async fn settled_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let t = at("2024-08-01T10:00:00Z");
        let client = MockClient::new();
        let session = MockSession::connected(SEPOLIA);

        let mut store = Store::open(StateDir::new(dir.path()), t);
        let record = ActionExecutor::default()
            .execute(&greet(), &client, &session, &mut store, t)
            .await
            .unwrap();

        let reopened = Store::open(StateDir::new(dir.path()), at("2024-08-01T18:00:00Z"));
        similar_asserts::assert_eq!(reopened.state().transactions, store.state().transactions);
        assert_eq!(reopened.state().transactions.get(&record.hash), Some(&record));
        assert!(reopened.state().cooldowns.is_on_cooldown(
            ActionKind::Greet,
            SEPOLIA,
            at("2024-08-01T18:00:00Z")
        ));
        assert_eq!(reopened.state().streak.count, 1);

        let next_day = Store::open(StateDir::new(dir.path()), at("2024-08-02T00:00:01Z"));
        assert!(next_day.state().cooldowns.is_empty());
        assert_eq!(next_day.state().streak.count, 1);
    }
}
