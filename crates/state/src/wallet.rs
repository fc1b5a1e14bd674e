use alloy_primitives::Address;
use serde::Serialize;
use voyager_common::{BALANCE_PLACEHOLDER, BALANCE_SENTINEL};

/// What the wallet session currently reports.
///
/// Never persisted: it is rebuilt from the session on every start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    pub address: Option<Address>,
    pub balance_display: String,
    pub chain_id: Option<u64>,
    pub connected: bool,
}

impl Default for WalletState {
    fn default() -> Self {
        Self::disconnected()
    }
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self {
            address: None,
            balance_display: BALANCE_PLACEHOLDER.to_string(),
            chain_id: None,
            connected: false,
        }
    }

    pub fn connected(address: Address, chain_id: u64) -> Self {
        Self {
            address: Some(address),
            balance_display: BALANCE_PLACEHOLDER.to_string(),
            chain_id: Some(chain_id),
            connected: true,
        }
    }

    /// Whether the last balance refresh fell back to the sentinel.
    pub fn balance_unavailable(&self) -> bool {
        self.balance_display == BALANCE_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_marks_balance_unavailable() {
        let mut wallet = WalletState::connected(Address::ZERO, 11155111);
        assert!(!wallet.balance_unavailable());

        wallet.balance_display = BALANCE_SENTINEL.to_string();
        assert!(wallet.balance_unavailable());

        wallet.balance_display = "0.0100".to_string();
        assert!(!wallet.balance_unavailable());
    }
}
