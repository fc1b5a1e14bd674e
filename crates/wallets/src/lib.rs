//! # voyager-wallets
//!
//! Signers and wallet sessions for voyager.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub use error::{SessionError, WalletSignerError};

mod opts;
pub use opts::WalletOpts;

mod session;
pub use session::{RpcSession, WalletSession};

mod signer;
pub use signer::{PendingSigner, WalletSigner};

pub mod utils;
