//! Commonly used constants.

use std::time::Duration;

/// How often the wallet balance is refreshed while the dashboard is open.
pub const BALANCE_REFRESH_INTERVAL: Duration = Duration::from_secs(20);

/// How long a single balance query may take before the sentinel is displayed instead.
pub const BALANCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time to wait for a transaction receipt.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(300);

/// Displayed in place of a balance that could not be fetched in time.
pub const BALANCE_SENTINEL: &str = "???";

/// Balance displayed before the first refresh completes.
pub const BALANCE_PLACEHOLDER: &str = "0.00";

/// Number of fractional digits shown for native balances.
pub const BALANCE_DISPLAY_DECIMALS: usize = 4;

/// JSON-RPC error code used by wallets when the user rejects a request (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;
