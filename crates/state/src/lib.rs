//! # voyager-state
//!
//! Client-local bookkeeping: per-day action cooldowns, the greeting streak, the activity log
//! and the preferences, plus the [`Store`] that applies [`Event`]s and persists the result.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod day;

mod action;
pub use action::ActionKind;

mod cooldown;
pub use cooldown::{CooldownRecord, Cooldowns};

mod streak;
pub use streak::StreakState;

mod txlog;
pub use txlog::{TransactionLog, TransactionRecord, TxStatus};

mod wallet;
pub use wallet::WalletState;

mod prefs;
pub use prefs::{Preferences, Theme};

mod app;
pub use app::{AppState, Dirty, Event};

mod store;
pub use store::{StateDir, Store};

mod error;
pub use error::StateError;
