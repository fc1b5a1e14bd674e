use super::Context;
use chrono::Utc;
use clap::Parser;
use eyre::{Result, bail};
use voyager::{ActionDescriptor, ActionError, ActionExecutor, Phase};
use voyager_cli::utils::spinner;
use voyager_common::{io::style, shell};
use voyager_state::{ActionKind, TransactionRecord};
use voyager_wallets::WalletOpts;

/// CLI arguments for `voyager gm` and `voyager deploy`.
#[derive(Clone, Debug, Parser)]
pub struct ActionArgs {
    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl ActionArgs {
    pub async fn run(self, kind: ActionKind, ctx: &mut Context) -> Result<()> {
        let action = ActionDescriptor::from_config(kind, &ctx.config)?;
        let Some(signer) = self.wallet.signer()? else {
            return Err(ActionError::not_connected().into());
        };

        let mut session = ctx.session(Some(signer));
        let client = ctx.connect(&mut session).await?;

        if !ctx.store.begin_action() {
            bail!("another action is already in progress");
        }

        let pb = spinner(format!("{} on {}", kind.activity_label(), ctx.network.name));
        let progress = pb.clone();
        let mut executor = ActionExecutor::new(ctx.registry)
            .with_balance_timeout(ctx.config.balance_timeout())
            .on_phase(move |phase, record| match (phase, record) {
                (Phase::Submitting, _) => progress.set_message("Waiting for the node to accept"),
                (Phase::AwaitingReceipt, Some(record)) => {
                    progress.set_message(format!("Waiting for receipt of {}", record.hash))
                }
                _ => {}
            });

        let result = executor.execute(&action, &client, &session, &mut ctx.store, Utc::now()).await;
        pb.finish_and_clear();
        ctx.store.end_action();

        let record = result?;
        print_settled(ctx, &record)
    }
}

fn print_settled(ctx: &Context, record: &TransactionRecord) -> Result<()> {
    let state = ctx.store.state();
    match record.action {
        ActionKind::Greet => {
            sh_println!("{} on {}", shell::styled(style::SUCCESS, "GM sent"), record.network_name)?;
            sh_println!(
                "{}",
                shell::styled(style::STREAK, format_args!("{} days streak", state.streak.count))
            )?;
        }
        ActionKind::Deploy => {
            sh_println!(
                "{} on {}",
                shell::styled(style::SUCCESS, "Contract deployed"),
                record.network_name
            )?;
            if let Some(address) = record.deployed_contract_address {
                sh_println!("address: {}", address.to_checksum(None))?;
            }
            if record.is_verifiable() {
                sh_println!("verify with: voyager verify {}", record.hash)?;
            }
        }
    }
    sh_println!("tx: {}", record.tx_url())?;
    sh_println!("balance: {} {}", state.wallet.balance_display, ctx.network.symbol)?;
    Ok(())
}
