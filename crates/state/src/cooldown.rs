use crate::{ActionKind, day};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The last successful execution of an action on a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownRecord {
    pub action: ActionKind,
    #[serde(alias = "testnetId")]
    pub chain_id: u64,
    #[serde(with = "chrono::serde::ts_milliseconds", alias = "lastExecuted")]
    pub last_executed_at: DateTime<Utc>,
}

impl CooldownRecord {
    /// Whether this record blocks the action at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        day::is_same_utc_day(self.last_executed_at, now)
    }
}

/// The set of cooldowns, unique per `(action, chain)`.
///
/// An action may run once per UTC calendar day and chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cooldowns {
    records: Vec<CooldownRecord>,
}

impl Cooldowns {
    /// Builds the active set from persisted records, dropping every record that is not on the
    /// UTC day of `now`.
    ///
    /// If the input holds several records for the same key, the most recent one wins.
    pub fn load_active(records: impl IntoIterator<Item = CooldownRecord>, now: DateTime<Utc>) -> Self {
        let mut cooldowns = Self::default();
        for record in records {
            if !record.is_active(now) {
                trace!(action = %record.action, chain = record.chain_id, "dropping stale cooldown");
                continue;
            }
            match cooldowns.position(record.action, record.chain_id) {
                Some(idx) if cooldowns.records[idx].last_executed_at >= record.last_executed_at => {}
                Some(idx) => cooldowns.records[idx] = record,
                None => cooldowns.records.push(record),
            }
        }
        cooldowns
    }

    /// Returns true iff `action` already ran on `chain_id` during the UTC day of `now`.
    pub fn is_on_cooldown(&self, action: ActionKind, chain_id: u64, now: DateTime<Utc>) -> bool {
        self.get(action, chain_id).is_some_and(|record| record.is_active(now))
    }

    /// Records a successful execution, replacing any earlier record for the key.
    pub fn record_execution(&mut self, action: ActionKind, chain_id: u64, at: DateTime<Utc>) {
        let record = CooldownRecord { action, chain_id, last_executed_at: at };
        match self.position(action, chain_id) {
            Some(idx) => self.records[idx] = record,
            None => self.records.push(record),
        }
    }

    /// Returns the record for the key, active or not.
    pub fn get(&self, action: ActionKind, chain_id: u64) -> Option<&CooldownRecord> {
        self.position(action, chain_id).map(|idx| &self.records[idx])
    }

    /// Time until the cooldown for the key lifts, or `None` if it is not active.
    pub fn remaining(&self, action: ActionKind, chain_id: u64, now: DateTime<Utc>) -> Option<Duration> {
        self.is_on_cooldown(action, chain_id, now).then(|| day::until_reset(now))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CooldownRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, action: ActionKind, chain_id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.action == action && r.chain_id == chain_id)
    }
}
