use crate::constants::USER_REJECTED_CODE;
use alloy_json_rpc::RpcError;
use alloy_provider::{PendingTransactionError, WatchTxError};
use alloy_transport::TransportError;
use std::fmt;

/// Broad category of a failure reported by the chain client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainErrorKind {
    /// The signer or wallet declined the request.
    UserRejected,
    /// The account cannot pay for value plus gas.
    InsufficientFunds,
    /// The node refused the transaction for any other reason.
    Rejected,
    /// The transaction was mined but reverted.
    Reverted,
    /// The endpoint could not be reached.
    Network,
    /// The request or receipt wait did not complete in time.
    Timeout,
    /// Anything not covered above.
    Other,
}

impl ChainErrorKind {
    /// Returns a short, stable identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserRejected => "user-rejected",
            Self::InsufficientFunds => "insufficient-funds",
            Self::Rejected => "rejected",
            Self::Reverted => "reverted",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Other => "other",
        }
    }

    /// Classifies a JSON-RPC error response.
    pub fn from_rpc(code: i64, message: &str) -> Self {
        let message = message.to_ascii_lowercase();
        if code == USER_REJECTED_CODE
            || message.contains("user rejected")
            || message.contains("user denied")
        {
            Self::UserRejected
        } else if message.contains("insufficient funds") {
            Self::InsufficientFunds
        } else if message.contains("execution reverted") {
            Self::Reverted
        } else {
            Self::Rejected
        }
    }
}

impl fmt::Display for ChainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified chain client failure with a short, user-presentable message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ChainError {
    /// What went wrong.
    pub kind: ChainErrorKind,
    /// Human-readable reason.
    pub message: String,
}

impl ChainError {
    /// Creates a new error.
    pub fn new(kind: ChainErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// A receipt with a failed status.
    pub fn reverted(message: impl Into<String>) -> Self {
        Self::new(ChainErrorKind::Reverted, message)
    }

    /// Classifies a transport level failure.
    pub fn from_transport(err: &TransportError) -> Self {
        match err {
            RpcError::ErrorResp(payload) => Self::new(
                ChainErrorKind::from_rpc(payload.code, &payload.message),
                reason(&payload.message),
            ),
            RpcError::Transport(kind) => {
                let message = kind.to_string();
                let lower = message.to_ascii_lowercase();
                let kind = if lower.contains("timed out") || lower.contains("timeout") {
                    ChainErrorKind::Timeout
                } else {
                    ChainErrorKind::Network
                };
                Self::new(kind, message)
            }
            other => Self::new(ChainErrorKind::Other, other.to_string()),
        }
    }

    /// Classifies a failure while waiting for a receipt.
    pub fn from_pending(err: &PendingTransactionError) -> Self {
        match err {
            PendingTransactionError::TransportError(err) => Self::from_transport(err),
            PendingTransactionError::TxWatcher(WatchTxError::Timeout) => Self::new(
                ChainErrorKind::Timeout,
                "timed out waiting for the transaction to be confirmed",
            ),
            other => Self::new(ChainErrorKind::Other, other.to_string()),
        }
    }
}

impl From<TransportError> for ChainError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(&err)
    }
}

impl From<PendingTransactionError> for ChainError {
    fn from(err: PendingTransactionError) -> Self {
        Self::from_pending(&err)
    }
}

/// Extracts the revert reason from `execution reverted: <reason>`, otherwise returns the message.
fn reason(message: &str) -> String {
    message
        .split_once("execution reverted: ")
        .map(|(_, reason)| reason)
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or(message)
        .trim()
        .to_string()
}
