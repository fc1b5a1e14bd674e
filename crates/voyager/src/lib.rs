//! # voyager
//!
//! Daily testnet greetings and mock contract deployments, with a local activity log, per-day
//! cooldowns and a greeting streak.

#[macro_use]
extern crate tracing;

pub mod action;
pub mod balance;
pub mod client;
pub mod executor;
pub mod switch;
pub mod verify;

mod error;
pub use error::{ActionError, ActionErrorKind, SwitchError};

pub use action::ActionDescriptor;
pub use balance::{BalanceWatcher, refresh_balance};
pub use client::{AlloyClient, ChainClient, ReceiptSummary};
pub use executor::{ActionExecutor, Phase};
pub use switch::{SwitchOutcome, switch_network};
pub use verify::{VerificationPackage, VerifyError, VerifyField};

#[cfg(test)]
pub(crate) mod test_utils;
