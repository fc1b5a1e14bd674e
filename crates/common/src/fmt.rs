//! Helpers for formatting ethereum values and durations for display.

use crate::constants::BALANCE_DISPLAY_DECIMALS;
use alloy_primitives::{
    Address, U256,
    utils::{ParseUnits, format_ether, parse_units},
};
use eyre::Result;
use std::{fmt, time::Duration};

/// Formats a wei amount as a decimal ether string rounded to four fractional digits.
///
/// `1234567800000000000` wei is rendered as `1.2346`.
pub fn format_balance(wei: U256) -> String {
    let value: f64 = format_ether(wei).parse().unwrap_or(f64::NAN);
    format!("{value:.prec$}", prec = BALANCE_DISPLAY_DECIMALS)
}

/// Parses a decimal ether amount such as `0.00001` into wei.
pub fn parse_ether(value: &str) -> Result<U256> {
    let parsed = parse_units(value.trim(), "ether")
        .map_err(|err| eyre::eyre!("invalid ether amount {value:?}: {err}"))?;
    match parsed {
        ParseUnits::U256(wei) => Ok(wei),
        ParseUnits::I256(_) => eyre::bail!("ether amount must not be negative: {value:?}"),
    }
}

/// Shortens an address to `0x1234…abcd`.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// Formats a duration as `{h}h {m}m {s}s`, the countdown shown for an active cooldown.
pub fn format_countdown(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Joins a block explorer base URL and a path such as `tx/0x…`.
///
/// Some explorers are registered with a trailing slash, which is ignored.
pub fn explorer_link(base: &str, path: impl fmt::Display) -> String {
    format!("{}/{path}", base.trim_end_matches('/'))
}
