use alloy_primitives::hex::FromHexError;
use alloy_signer::k256::ecdsa;
use alloy_signer_local::LocalSignerError;
use voyager_common::errors::ChainError;
use voyager_config::UnresolvedEnvVarError;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WalletSignerError {
    #[error(transparent)]
    Local(#[from] LocalSignerError),
    #[error("Failed to decrypt keystore: incorrect password")]
    IncorrectKeystorePassword,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    InvalidHex(#[from] FromHexError),
    #[error(transparent)]
    Ecdsa(#[from] ecdsa::Error),
}

/// Errors raised by a [`WalletSession`](crate::WalletSession).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no wallet connected; pass --private-key, --keystore, --account or --mnemonic")]
    NoWallet,
    #[error("network switching is unavailable while --rpc-url is pinned")]
    SwitchUnsupported,
    #[error("endpoint reports chain {actual}, expected {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
    #[error(transparent)]
    Rpc(#[from] ChainError),
    #[error(transparent)]
    Endpoint(#[from] UnresolvedEnvVarError),
}
