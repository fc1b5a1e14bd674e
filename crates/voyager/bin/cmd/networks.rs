use super::Context;
use clap::Parser;
use eyre::Result;
use voyager_config::NetworkDescriptor;

/// CLI arguments for `voyager networks`.
#[derive(Clone, Debug, Parser)]
pub struct NetworksArgs {
    /// Print the networks as JSON.
    #[arg(long, short)]
    pub json: bool,
}

impl NetworksArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        if self.json {
            let networks: Vec<_> = ctx.registry.iter().collect();
            sh_println!("{}", serde_json::to_string_pretty(&networks)?)?;
            return Ok(());
        }
        print_picker(ctx)
    }
}

/// Prints every network, marking the active one.
pub fn print_picker(ctx: &Context) -> Result<()> {
    let mut table = ctx.table();
    table.set_header(["", "Chain ID", "Network", "Symbol", "Explorer", "Faucet"]);
    for network in ctx.registry.iter() {
        table.add_row(row(network, network.chain_id == ctx.network.chain_id));
    }
    sh_println!("{}", ctx.heading("Native testnets"))?;
    sh_println!("{table}")?;
    Ok(())
}

fn row(network: &NetworkDescriptor, active: bool) -> [String; 6] {
    [
        if active { "*".to_string() } else { String::new() },
        network.chain_id.to_string(),
        network.name.to_string(),
        network.symbol.to_string(),
        network.explorer_url.to_string(),
        network.faucet_url.to_string(),
    ]
}
