//! Best-effort balance display.

use crate::client::ChainClient;
use alloy_primitives::Address;
use std::{ops::ControlFlow, time::Duration};
use tokio::time::MissedTickBehavior;
use voyager_common::{BALANCE_SENTINEL, fmt::format_balance};

/// Fetches the balance of `address` for display.
///
/// Gives up after `timeout` and returns the `???` sentinel instead, as it does on any error.
/// The underlying request is not cancelled on the node.
pub async fn refresh_balance<C: ChainClient + ?Sized>(
    client: &C,
    address: Address,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, client.get_balance(address)).await {
        Ok(Ok(wei)) => format_balance(wei),
        Ok(Err(err)) => {
            warn!(%address, %err, "balance fetch failed");
            BALANCE_SENTINEL.to_string()
        }
        Err(_) => {
            warn!(%address, ?timeout, "balance fetch timed out");
            BALANCE_SENTINEL.to_string()
        }
    }
}

/// Refreshes a balance on a fixed interval.
#[derive(Clone, Copy, Debug)]
pub struct BalanceWatcher {
    interval: Duration,
    timeout: Duration,
}

impl BalanceWatcher {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Calls `on_balance` right away and then once per interval until `shutdown` resolves or
    /// `on_balance` breaks.
    ///
    /// Returns the number of refreshes.
    pub async fn run_until<C, F, S>(
        &self,
        client: &C,
        address: Address,
        mut on_balance: F,
        shutdown: S,
    ) -> usize
    where
        C: ChainClient + ?Sized,
        F: FnMut(String) -> ControlFlow<()>,
        S: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut ticks = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    let balance = refresh_balance(client, address, self.timeout).await;
                    trace!(%address, %balance, "refreshed balance");
                    ticks += 1;
                    if on_balance(balance).is_break() {
                        break;
                    }
                }
            }
        }
        ticks
    }
}
