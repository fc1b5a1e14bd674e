mod network;
mod shell;

pub use network::NetworkOpts;
pub use shell::{ColorChoice, ShellOptions};
