use super::Context;
use clap::Parser;
use eyre::{OptionExt, Result};
use std::{io, ops::ControlFlow};
use voyager::BalanceWatcher;
use voyager_state::Event;
use voyager_wallets::{WalletOpts, WalletSession};

/// CLI arguments for `voyager watch`.
#[derive(Clone, Debug, Parser)]
pub struct WatchArgs {
    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl WatchArgs {
    pub async fn run(self, ctx: &mut Context) -> Result<()> {
        let signer = self.wallet.signer()?.ok_or_eyre(voyager::ActionError::not_connected())?;
        let mut session = ctx.session(Some(signer));
        let client = ctx.connect(&mut session).await?;
        let address = session.address().ok_or_eyre("session has no address")?;

        let symbol = ctx.network.symbol;
        let watcher = BalanceWatcher::new(
            ctx.config.balance_refresh_interval(),
            ctx.config.balance_timeout(),
        );
        let store = &mut ctx.store;
        let mut write_error = None;
        let shutdown = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(%err, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        };

        let refreshes = watcher
            .run_until(
                &client,
                address,
                |balance| {
                    if let Err(err) = sh_println!("{balance} {symbol}") {
                        write_error = Some(err);
                        return ControlFlow::Break(());
                    }
                    if let Err(err) = store.dispatch(Event::BalanceRefreshed(balance)) {
                        warn!(%err, "failed to record balance");
                    }
                    ControlFlow::Continue(())
                },
                shutdown,
            )
            .await;
        debug!(refreshes, "stopped watching");

        match write_error {
            Some(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}
