use crate::day::{is_previous_utc_day, is_same_utc_day};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voyager_common::serde_helpers::millis_or_zero;

/// Number of consecutive UTC days with a confirmed greeting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub count: u32,
    /// Time of the last confirmed greeting, `None` if there never was one.
    #[serde(with = "millis_or_zero", alias = "lastGmTimestamp")]
    pub last_greet_at: Option<DateTime<Utc>>,
}

impl StreakState {
    /// Advances the streak for a greeting confirmed at `now`.
    ///
    /// - first greeting, or the day after the last one: `count + 1`
    /// - same UTC day as the last one: unchanged
    /// - anything else (gap of two or more days, clock moved backwards): restart at 1
    #[must_use]
    pub fn advance(self, now: DateTime<Utc>) -> Self {
        match self.last_greet_at {
            None => Self { count: self.count + 1, last_greet_at: Some(now) },
            Some(last) if is_previous_utc_day(last, now) => {
                Self { count: self.count + 1, last_greet_at: Some(now) }
            }
            Some(last) if is_same_utc_day(last, now) => self,
            Some(_) => Self { count: 1, last_greet_at: Some(now) },
        }
    }

    /// Resets the streak if the last greeting was neither today nor yesterday.
    ///
    /// Applied on load so a lapsed streak is not displayed or continued.
    #[must_use]
    pub fn expire_stale(self, now: DateTime<Utc>) -> Self {
        match self.last_greet_at {
            Some(last) if !is_same_utc_day(last, now) && !is_previous_utc_day(last, now) => {
                debug!(count = self.count, %last, "streak lapsed");
                Self::default()
            }
            _ => self,
        }
    }

    /// Whether a greeting has already been counted on the UTC day of `now`.
    pub fn counted_today(&self, now: DateTime<Utc>) -> bool {
        self.last_greet_at.is_some_and(|last| is_same_utc_day(last, now))
    }
}
