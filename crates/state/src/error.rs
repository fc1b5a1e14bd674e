use crate::TxStatus;
use alloy_primitives::TxHash;

/// Errors raised when an [`Event`](crate::Event) cannot be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("no transaction with hash {0} in the activity log")]
    UnknownTransaction(TxHash),
    #[error("transaction {hash} is already {from}, it cannot become {to}")]
    IllegalTransition { hash: TxHash, from: TxStatus, to: TxStatus },
    #[error("transaction {0} is already in the activity log")]
    DuplicateTransaction(TxHash),
}
