use std::fmt;
use voyager_common::errors::{ChainError, ChainErrorKind};
use voyager_state::StateError;
use voyager_wallets::SessionError;

/// Why an action did not complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionErrorKind {
    NotConnected,
    /// The wallet is on a chain missing from the registry.
    UnknownChain,
    CooldownActive,
    /// The chain client failed while submitting or waiting.
    Chain(ChainErrorKind),
    /// The activity log rejected a transition.
    State,
}

impl fmt::Display for ActionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => f.write_str("not-connected"),
            Self::UnknownChain => f.write_str("unknown-chain"),
            Self::CooldownActive => f.write_str("cooldown-active"),
            Self::Chain(kind) => kind.fmt(f),
            Self::State => f.write_str("state"),
        }
    }
}

impl ActionErrorKind {
    /// The chain error kind, if the failure came from the chain client.
    pub fn chain(&self) -> Option<ChainErrorKind> {
        match self {
            Self::Chain(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// A failed action with a message suitable for the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    pub kind: ActionErrorKind,
    pub message: String,
}

impl ActionError {
    pub fn new(kind: ActionErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn not_connected() -> Self {
        Self::new(ActionErrorKind::NotConnected, "Connect wallet first.")
    }

    pub fn unknown_chain(chain_id: u64) -> Self {
        Self::new(
            ActionErrorKind::UnknownChain,
            format!("Your wallet is on chain id {chain_id}, which is not a supported network."),
        )
    }

    pub fn cooldown(network: &str) -> Self {
        Self::new(
            ActionErrorKind::CooldownActive,
            format!("Daily interaction limit reached for {network}."),
        )
    }

    /// Whether the action was refused before anything was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self.kind,
            ActionErrorKind::NotConnected
                | ActionErrorKind::UnknownChain
                | ActionErrorKind::CooldownActive
        )
    }
}

impl From<ChainError> for ActionError {
    fn from(err: ChainError) -> Self {
        let message =
            if err.message.trim().is_empty() { "Transaction failed.".to_string() } else { err.message };
        Self::new(ActionErrorKind::Chain(err.kind), message)
    }
}

impl From<StateError> for ActionError {
    fn from(err: StateError) -> Self {
        Self::new(ActionErrorKind::State, err.to_string())
    }
}

/// A network switch that the session refused or that failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Switch failed: {message}")]
pub struct SwitchError {
    pub message: String,
}

impl SwitchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<SessionError> for SwitchError {
    fn from(err: SessionError) -> Self {
        Self::new(err.to_string())
    }
}
