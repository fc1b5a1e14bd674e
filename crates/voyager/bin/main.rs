#[macro_use]
extern crate tracing;
#[macro_use]
extern crate voyager_common;

use clap::Parser;
use eyre::Result;
use voyager_cli::{handler, utils};

mod args;
mod cmd;

use args::Voyager;

fn main() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();

    let args = Voyager::parse();
    args.shell.set_global_shell();

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(args::run_command(args))
}
