use super::Context;
use alloy_primitives::TxHash;
use clap::Parser;
use eyre::Result;
use voyager::{VerificationPackage, VerifyField};

/// CLI arguments for `voyager verify`.
#[derive(Clone, Debug, Parser)]
pub struct VerifyArgs {
    /// Hash of the deployment transaction.
    #[arg(value_name = "TX_HASH")]
    pub hash: TxHash,

    /// Print a single field raw, e.g. to pipe it into a clipboard tool.
    #[arg(long, short, value_enum)]
    pub field: Option<VerifyField>,

    /// Print the package as JSON.
    #[arg(long, short, conflicts_with = "field")]
    pub json: bool,
}

impl VerifyArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let package = VerificationPackage::from_log(
            &ctx.store.state().transactions,
            &self.hash,
            &ctx.registry,
        )?;

        if let Some(field) = self.field {
            sh_println!("{}", package.field(field))?;
            return Ok(());
        }
        if self.json {
            sh_println!("{}", serde_json::to_string_pretty(&package)?)?;
            return Ok(());
        }

        sh_println!("{}", ctx.heading(format_args!("Verify {} on {}", package.name, package.network_name)))?;
        sh_println!("address:  {}", package.field(VerifyField::Address))?;
        sh_println!("name:     {}", package.name)?;
        sh_println!("compiler: see the explorer form; the bytecode is prebuilt")?;
        sh_println!("url:      {}", package.verify_url)?;
        sh_println!()?;
        sh_println!("{}", ctx.heading("ABI"))?;
        sh_println!("{}", package.abi)?;
        sh_println!()?;
        sh_println!("{}", ctx.heading("Bytecode"))?;
        sh_println!("{}", package.bytecode)?;
        Ok(())
    }
}
