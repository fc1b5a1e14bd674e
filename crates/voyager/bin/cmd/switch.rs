use super::{Context, networks::print_picker};
use clap::Parser;
use eyre::{OptionExt, Result};
use voyager::{SwitchError, SwitchOutcome, switch_network};
use voyager_wallets::{WalletOpts, WalletSession};

/// CLI arguments for `voyager switch`.
#[derive(Clone, Debug, Parser)]
pub struct SwitchArgs {
    /// Network name or chain id, as listed by `voyager networks`.
    #[arg(value_name = "NETWORK")]
    pub target: String,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl SwitchArgs {
    pub async fn run(self, ctx: &mut Context) -> Result<()> {
        let target = ctx
            .registry
            .find_by_name(&self.target)
            .ok_or_eyre(format!("unknown network `{}`; run `voyager networks` to list them", self.target))?;

        // Open the session on the target directly; the current endpoint may be down.
        let signer = self.wallet.signer()?;
        let has_wallet = signer.is_some();
        let mut session = ctx.session_on(target, signer);
        if has_wallet && session.can_switch_chain() {
            session.connect().await.map_err(SwitchError::from)?;
        }

        let registry = ctx.registry;
        match switch_network(&mut session, &mut ctx.store, &registry, target.chain_id).await? {
            SwitchOutcome::Switched(network) => {
                ctx.network = network;
                sh_println!("Switched to {} ({})", network.name, network.chain_id)?;
            }
            SwitchOutcome::PickerShown => {
                sh_warn!("cannot switch networks while --rpc-url is pinned; pick one with --network")?;
                print_picker(ctx)?;
            }
        }
        Ok(())
    }
}
