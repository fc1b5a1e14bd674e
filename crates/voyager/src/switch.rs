//! Switching the active network.

use crate::{error::SwitchError, executor::sync_wallet};
use voyager_config::{NetworkDescriptor, NetworkRegistry};
use voyager_state::{Event, Store};
use voyager_wallets::WalletSession;

/// What a switch request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The session now targets the network.
    Switched(&'static NetworkDescriptor),
    /// The session cannot switch; the caller should show the network picker instead.
    PickerShown,
}

/// Asks `session` to move to `chain_id`.
///
/// Falls back to [`SwitchOutcome::PickerShown`] when the session has no switch capability.
/// Failures are not retried.
pub async fn switch_network<S: WalletSession + ?Sized>(
    session: &mut S,
    store: &mut Store,
    registry: &NetworkRegistry,
    chain_id: u64,
) -> Result<SwitchOutcome, SwitchError> {
    let target = registry
        .find(chain_id)
        .ok_or_else(|| SwitchError::new(format!("chain id {chain_id} is not a supported network")))?;

    if !session.can_switch_chain() {
        debug!(chain_id, "session cannot switch chains");
        return Ok(SwitchOutcome::PickerShown);
    }

    session.switch_chain(target).await.map_err(SwitchError::from)?;
    info!(chain_id, network = target.name, "switched network");

    if let Err(err) = store.dispatch(Event::NetworkSelected(chain_id)) {
        warn!(%err, "failed to record selected network");
    }
    sync_wallet(session, store);

    Ok(SwitchOutcome::Switched(target))
}
