use crate::{ActionKind, StateError};
use alloy_primitives::{Address, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use voyager_common::fmt::explorer_link;

/// Lifecycle of a submitted transaction.
///
/// A record starts out `Pending` and settles exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TxStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }

    /// Whether the status is terminal.
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Only `pending -> confirmed` and `pending -> failed` are allowed.
    pub const fn can_become(&self, next: Self) -> bool {
        matches!((self, next), (Self::Pending, Self::Confirmed | Self::Failed))
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry of the activity log.
///
/// The log caches what was submitted from this machine; the chain remains the source of truth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: TxHash,
    pub action: ActionKind,
    pub network_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds", alias = "timestamp")]
    pub submitted_at: DateTime<Utc>,
    pub status: TxStatus,
    pub explorer_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "contractAddress")]
    pub deployed_contract_address: Option<Address>,
}

impl TransactionRecord {
    /// A freshly submitted, unconfirmed transaction.
    pub fn pending(
        hash: TxHash,
        action: ActionKind,
        network_name: impl Into<String>,
        explorer_url: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            hash,
            action,
            network_name: network_name.into(),
            submitted_at,
            status: TxStatus::Pending,
            explorer_url: explorer_url.into(),
            deployed_contract_address: None,
        }
    }

    /// Link to the transaction on the block explorer.
    pub fn tx_url(&self) -> String {
        explorer_link(&self.explorer_url, format_args!("tx/{:#x}", self.hash))
    }

    /// Whether this is a confirmed deployment with a known contract address.
    pub fn is_verifiable(&self) -> bool {
        self.action == ActionKind::Deploy
            && self.status == TxStatus::Confirmed
            && self.deployed_contract_address.is_some()
    }
}

/// Append-only activity log, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    /// Prepends a pending record.
    pub fn push_pending(&mut self, mut record: TransactionRecord) -> Result<(), StateError> {
        if self.get(&record.hash).is_some() {
            return Err(StateError::DuplicateTransaction(record.hash));
        }
        record.status = TxStatus::Pending;
        record.deployed_contract_address = None;
        self.records.insert(0, record);
        Ok(())
    }

    /// Marks the record as confirmed, capturing the deployed contract address if any.
    pub fn confirm(
        &mut self,
        hash: &TxHash,
        contract: Option<Address>,
    ) -> Result<&TransactionRecord, StateError> {
        let record = self.transition(hash, TxStatus::Confirmed)?;
        record.deployed_contract_address = contract;
        Ok(&*record)
    }

    /// Marks the record as failed.
    pub fn fail(&mut self, hash: &TxHash) -> Result<&TransactionRecord, StateError> {
        self.transition(hash, TxStatus::Failed).map(|record| &*record)
    }

    pub fn get(&self, hash: &TxHash) -> Option<&TransactionRecord> {
        self.records.iter().find(|record| record.hash == *hash)
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    /// Records still waiting for a receipt.
    pub fn pending(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter().filter(|record| !record.status.is_settled())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn transition(
        &mut self,
        hash: &TxHash,
        to: TxStatus,
    ) -> Result<&mut TransactionRecord, StateError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.hash == *hash)
            .ok_or(StateError::UnknownTransaction(*hash))?;
        if !record.status.can_become(to) {
            return Err(StateError::IllegalTransition { hash: *hash, from: record.status, to });
        }
        record.status = to;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::at;
    use alloy_primitives::{address, b256};

    const HASH_A: TxHash =
        b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
    const HASH_B: TxHash =
        b256!("0x2222222222222222222222222222222222222222222222222222222222222222");

    fn record(hash: TxHash, action: ActionKind) -> TransactionRecord {
        TransactionRecord::pending(
            hash,
            action,
            "Sepolia",
            "https://sepolia.etherscan.io",
            at("2024-07-01T12:00:00Z"),
        )
    }

    #[test]
    fn newest_first() {
        let mut log = TransactionLog::default();
        log.push_pending(record(HASH_A, ActionKind::Greet)).unwrap();
        log.push_pending(record(HASH_B, ActionKind::Deploy)).unwrap();
        let hashes: Vec<_> = log.iter().map(|r| r.hash).collect();
        assert_eq!(hashes, [HASH_B, HASH_A]);
    }

    #[test]
    fn rejects_duplicates() {
        let mut log = TransactionLog::default();
        log.push_pending(record(HASH_A, ActionKind::Greet)).unwrap();
        assert_eq!(
            log.push_pending(record(HASH_A, ActionKind::Greet)),
            Err(StateError::DuplicateTransaction(HASH_A))
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn settles_exactly_once() {
        let mut log = TransactionLog::default();
        log.push_pending(record(HASH_A, ActionKind::Greet)).unwrap();
        log.push_pending(record(HASH_B, ActionKind::Greet)).unwrap();

        assert_eq!(log.confirm(&HASH_A, None).unwrap().status, TxStatus::Confirmed);
        assert_eq!(log.fail(&HASH_B).unwrap().status, TxStatus::Failed);

        assert_eq!(
            log.fail(&HASH_A),
            Err(StateError::IllegalTransition {
                hash: HASH_A,
                from: TxStatus::Confirmed,
                to: TxStatus::Failed
            })
        );
        assert!(log.confirm(&HASH_B, None).is_err());
        assert_eq!(log.get(&HASH_A).unwrap().status, TxStatus::Confirmed);
        assert_eq!(log.get(&HASH_B).unwrap().status, TxStatus::Failed);
        assert_eq!(log.pending().count(), 0);
    }

    #[test]
    fn unknown_hash() {
        let mut log = TransactionLog::default();
        assert_eq!(log.fail(&HASH_A), Err(StateError::UnknownTransaction(HASH_A)));
    }

    #[test]
    fn captures_contract_address() {
        let contract = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let mut log = TransactionLog::default();
        log.push_pending(record(HASH_A, ActionKind::Deploy)).unwrap();
        let confirmed = log.confirm(&HASH_A, Some(contract)).unwrap();
        assert_eq!(confirmed.deployed_contract_address, Some(contract));
        assert!(confirmed.is_verifiable());
    }

    #[test]
    fn explorer_link() {
        let mut record = record(HASH_A, ActionKind::Greet);
        record.explorer_url = "https://testnet.arcscan.app/".to_string();
        assert_eq!(
            record.tx_url(),
            "https://testnet.arcscan.app/tx/0x1111111111111111111111111111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn json_shape() {
        let mut log = TransactionLog::default();
        log.push_pending(record(HASH_A, ActionKind::Greet)).unwrap();
        let json = serde_json::to_value(&log).unwrap();
        similar_asserts::assert_eq!(
            json,
            serde_json::json!([{
                "hash": "0x1111111111111111111111111111111111111111111111111111111111111111",
                "action": "GM",
                "networkName": "Sepolia",
                "submittedAt": 1719835200000i64,
                "status": "pending",
                "explorerUrl": "https://sepolia.etherscan.io"
            }])
        );
    }
}
