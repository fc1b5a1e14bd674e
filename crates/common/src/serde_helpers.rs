//! Misc Serde helpers for voyager crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// (De)serializes an optional UTC timestamp as Unix milliseconds, using `0` for `None`.
///
/// ```ignore
/// #[serde(with = "voyager_common::serde_helpers::millis_or_zero")]
/// last_seen: Option<DateTime<Utc>>,
/// ```
pub mod millis_or_zero {
    use super::*;

    /// Serializes `None` as `0`.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.map(|ts| ts.timestamp_millis()).unwrap_or_default())
    }

    /// Deserializes `0` (or a negative value) as `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        if millis <= 0 {
            return Ok(None);
        }
        DateTime::from_timestamp_millis(millis)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "millis_or_zero")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn zero_means_never() {
        let stamp: Stamp = serde_json::from_str(r#"{"at":0}"#).unwrap();
        assert_eq!(stamp, Stamp { at: None });
        assert_eq!(serde_json::to_string(&stamp).unwrap(), r#"{"at":0}"#);
    }

    #[test]
    fn keeps_millis() {
        let stamp: Stamp = serde_json::from_str(r#"{"at":1718000000123}"#).unwrap();
        assert_eq!(stamp.at.unwrap().timestamp_millis(), 1_718_000_000_123);
    }
}
