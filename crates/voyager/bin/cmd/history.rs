use super::Context;
use clap::Parser;
use eyre::Result;
use voyager_common::{io::style, shell};
use voyager_state::TxStatus;

/// CLI arguments for `voyager history`.
#[derive(Clone, Debug, Parser)]
pub struct HistoryArgs {
    /// Print the raw records as JSON.
    #[arg(long, short)]
    pub json: bool,

    /// Only show the most recent entries.
    #[arg(long, short = 'l', value_name = "COUNT")]
    pub limit: Option<usize>,
}

impl HistoryArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let records: Vec<_> = ctx
            .store
            .state()
            .transactions
            .iter()
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        if self.json {
            sh_println!("{}", serde_json::to_string_pretty(&records)?)?;
            return Ok(());
        }

        if records.is_empty() {
            sh_println!("No activity yet.")?;
            return Ok(());
        }

        let mut table = ctx.table();
        table.set_header(["Time (UTC)", "Activity", "Network", "Status", "Explorer"]);
        for record in records {
            let status = match record.status {
                TxStatus::Pending => shell::styled(style::WARN, record.status),
                TxStatus::Confirmed => shell::styled(style::SUCCESS, record.status),
                TxStatus::Failed => shell::styled(style::ERROR, record.status),
            };
            table.add_row([
                record.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
                record.action.activity_label().to_string(),
                record.network_name.clone(),
                status,
                record.tx_url(),
            ]);
        }
        sh_println!("{}", ctx.heading("Activity"))?;
        sh_println!("{table}")?;

        let pending = ctx.store.state().transactions.pending().count();
        if pending > 0 {
            sh_println!(
                "{}",
                shell::styled(style::DIM, format_args!("{pending} still pending; receipts are not re-checked"))
            )?;
        }
        Ok(())
    }
}
