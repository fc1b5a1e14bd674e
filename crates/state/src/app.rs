use crate::{
    ActionKind, CooldownRecord, Cooldowns, Preferences, StateError, StreakState, Theme,
    TransactionLog, TransactionRecord, WalletState,
};
use alloy_primitives::{Address, TxHash};
use chrono::{DateTime, Utc};

/// A state transition. All mutations of [`AppState`] go through [`AppState::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The wallet session reported a new address/chain/connection state.
    WalletUpdated(WalletState),
    /// A balance refresh completed (possibly with the sentinel value).
    BalanceRefreshed(String),
    /// A transaction was accepted by the node and has a hash.
    TransactionSubmitted(TransactionRecord),
    /// The transaction was mined successfully.
    TransactionConfirmed { hash: TxHash, contract_address: Option<Address> },
    /// The transaction reverted or the receipt could not be obtained.
    TransactionFailed { hash: TxHash },
    /// An action was confirmed on `chain_id`: starts its cooldown and, for greetings, advances
    /// the streak.
    ActionCompleted { action: ActionKind, chain_id: u64, at: DateTime<Utc> },
    ThemeSet(Theme),
    NetworkSelected(u64),
}

/// Which persisted documents an [`Event`] modified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dirty {
    pub transactions: bool,
    pub cooldowns: bool,
    pub streak: bool,
    pub preferences: bool,
}

impl Dirty {
    pub const CLEAN: Self =
        Self { transactions: false, cooldowns: false, streak: false, preferences: false };

    pub const fn is_clean(&self) -> bool {
        !(self.transactions || self.cooldowns || self.streak || self.preferences)
    }
}

/// The complete client-local state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub wallet: WalletState,
    pub cooldowns: Cooldowns,
    pub streak: StreakState,
    pub transactions: TransactionLog,
    pub preferences: Preferences,
}

impl AppState {
    /// Rebuilds the state from persisted documents.
    ///
    /// Cooldowns from earlier UTC days are dropped and a lapsed streak is reset right away, so
    /// neither depends on the user doing anything first.
    pub fn restore(
        transactions: TransactionLog,
        cooldowns: Vec<CooldownRecord>,
        streak: StreakState,
        preferences: Preferences,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            wallet: WalletState::disconnected(),
            cooldowns: Cooldowns::load_active(cooldowns, now),
            streak: streak.expire_stale(now),
            transactions,
            preferences,
        }
    }

    /// Applies `event`, returning the documents that need to be persisted.
    ///
    /// On error the state is left unchanged.
    pub fn apply(&mut self, event: Event) -> Result<Dirty, StateError> {
        let mut dirty = Dirty::CLEAN;
        match event {
            Event::WalletUpdated(wallet) => self.wallet = wallet,
            Event::BalanceRefreshed(balance) => self.wallet.balance_display = balance,
            Event::TransactionSubmitted(record) => {
                self.transactions.push_pending(record)?;
                dirty.transactions = true;
            }
            Event::TransactionConfirmed { hash, contract_address } => {
                self.transactions.confirm(&hash, contract_address)?;
                dirty.transactions = true;
            }
            Event::TransactionFailed { hash } => {
                self.transactions.fail(&hash)?;
                dirty.transactions = true;
            }
            Event::ActionCompleted { action, chain_id, at } => {
                self.cooldowns.record_execution(action, chain_id, at);
                dirty.cooldowns = true;
                if action == ActionKind::Greet {
                    let streak = self.streak.advance(at);
                    dirty.streak = streak != self.streak;
                    self.streak = streak;
                }
            }
            Event::ThemeSet(theme) => {
                dirty.preferences = self.preferences.theme != theme;
                self.preferences.theme = theme;
            }
            Event::NetworkSelected(chain_id) => {
                dirty.preferences = self.preferences.selected_network != Some(chain_id);
                self.preferences.selected_network = Some(chain_id);
            }
        }
        Ok(dirty)
    }
}
