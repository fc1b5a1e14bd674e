use super::Context;
use chrono::Utc;
use clap::Parser;
use eyre::Result;
use voyager::refresh_balance;
use voyager_common::{
    fmt::{format_countdown, short_address},
    io::style,
    shell,
};
use voyager_state::{ActionKind, Event};
use voyager_wallets::{WalletOpts, WalletSession};

/// CLI arguments for `voyager status`.
#[derive(Clone, Debug, Parser)]
pub struct StatusArgs {
    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl StatusArgs {
    pub async fn run(self, ctx: &mut Context) -> Result<()> {
        if let Some(signer) = self.wallet.signer()? {
            let mut session = ctx.session(Some(signer));
            match ctx.connect(&mut session).await {
                Ok(client) => {
                    if let Some(address) = session.address() {
                        let balance =
                            refresh_balance(&client, address, ctx.config.balance_timeout()).await;
                        ctx.store.dispatch(Event::BalanceRefreshed(balance))?;
                    }
                }
                Err(err) => sh_warn!("{err:#}")?,
            }
        }

        let now = Utc::now();
        let network = ctx.network;
        let state = ctx.store.state();

        sh_println!("{}", ctx.heading("Wallet"))?;
        match state.wallet.address {
            Some(address) if state.wallet.connected => {
                sh_println!("  address  {}", short_address(&address))?;
                sh_println!("           {}", network.address_url(&address))?;
                sh_println!("  balance  {} {}", state.wallet.balance_display, network.symbol)?;
                if state.wallet.balance_unavailable() {
                    sh_warn!("balance unavailable; the endpoint did not answer in time")?;
                }
                if let Some(chain_id) = state.wallet.chain_id.filter(|id| *id != network.chain_id) {
                    sh_warn!("endpoint reports chain {chain_id}, not {}", network.name)?;
                }
            }
            _ => sh_println!("  not connected; pass --private-key, --keystore or --account")?,
        }

        sh_println!()?;
        sh_println!("{}", ctx.heading("Network"))?;
        sh_println!("  {} ({})", network.name, network.chain_id)?;
        sh_println!("  rpc      {}", ctx.rpc_url()?)?;
        sh_println!("  explorer {}", network.explorer_url)?;
        sh_println!("  faucet   {}", network.faucet_url)?;

        sh_println!()?;
        sh_println!("{}", ctx.heading("Today"))?;
        for action in ActionKind::ALL {
            let line = match state.cooldowns.remaining(action, network.chain_id, now) {
                Some(left) => shell::styled(style::DIM, format_args!("resets in {}", format_countdown(left))),
                None => shell::styled(style::SUCCESS, "ready"),
            };
            sh_println!("  {:<8} {line}", action.as_str())?;
        }
        sh_println!(
            "  {:<8} {}",
            "STREAK",
            shell::styled(style::STREAK, format_args!("{} days", state.streak.count))
        )?;
        Ok(())
    }
}
