use crate::cmd::{
    Context, action::ActionArgs, history::HistoryArgs, networks::NetworksArgs, status::StatusArgs,
    switch::SwitchArgs, theme::ThemeArgs, verify::VerifyArgs, watch::WatchArgs,
};
use clap::{Parser, Subcommand};
use eyre::Result;
use voyager_cli::opts::{NetworkOpts, ShellOptions};
use voyager_state::ActionKind;

/// Daily testnet greetings and mock deployments from your terminal.
#[derive(Debug, Parser)]
#[command(name = "voyager", version, next_display_order = None)]
pub struct Voyager {
    #[command(flatten)]
    pub shell: ShellOptions,

    #[command(flatten)]
    pub network: NetworkOpts,

    #[command(subcommand)]
    pub cmd: VoyagerSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum VoyagerSubcommand {
    /// List the supported testnets.
    #[command(visible_aliases = &["n", "ls"])]
    Networks(NetworksArgs),

    /// Select the active network by name or chain id.
    #[command(visible_alias = "sw")]
    Switch(SwitchArgs),

    /// Show the wallet, streak and cooldowns on the active network.
    #[command(visible_alias = "st")]
    Status(StatusArgs),

    /// Send today's GM on the active network.
    #[command(visible_alias = "greet")]
    Gm(ActionArgs),

    /// Deploy the mock contract on the active network.
    Deploy(ActionArgs),

    /// List recent activity, newest first.
    #[command(visible_alias = "h")]
    History(HistoryArgs),

    /// Print what is needed to verify a deployed contract on the explorer.
    Verify(VerifyArgs),

    /// Show the current GM streak.
    Streak,

    /// Show, set or toggle the colour theme.
    Theme(ThemeArgs),

    /// Keep refreshing the wallet balance until interrupted.
    Watch(WatchArgs),
}

pub async fn run_command(args: Voyager) -> Result<()> {
    let Voyager { network, cmd, .. } = args;
    let mut ctx = Context::load(&network)?;

    match cmd {
        VoyagerSubcommand::Networks(cmd) => cmd.run(&ctx),
        VoyagerSubcommand::Switch(cmd) => cmd.run(&mut ctx).await,
        VoyagerSubcommand::Status(cmd) => cmd.run(&mut ctx).await,
        VoyagerSubcommand::Gm(cmd) => cmd.run(ActionKind::Greet, &mut ctx).await,
        VoyagerSubcommand::Deploy(cmd) => cmd.run(ActionKind::Deploy, &mut ctx).await,
        VoyagerSubcommand::History(cmd) => cmd.run(&ctx),
        VoyagerSubcommand::Verify(cmd) => cmd.run(&ctx),
        VoyagerSubcommand::Streak => crate::cmd::streak::run(&ctx),
        VoyagerSubcommand::Theme(cmd) => cmd.run(&mut ctx),
        VoyagerSubcommand::Watch(cmd) => cmd.run(&mut ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::theme::ThemeChoice;
    use clap::CommandFactory;
    use std::path::PathBuf;
    use voyager::VerifyField;

    #[test]
    fn verify_cli() {
        Voyager::command().debug_assert();
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = Voyager::try_parse_from([
            "voyager",
            "status",
            "--network",
            "base sepolia",
            "--state-dir",
            "/tmp/voyager",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.network.network.as_deref(), Some("base sepolia"));
        assert_eq!(args.network.state_dir, Some(PathBuf::from("/tmp/voyager")));
        assert!(args.shell.quiet);
        assert!(matches!(args.cmd, VoyagerSubcommand::Status(_)));
    }

    #[test]
    fn parses_verify_field() {
        let args = Voyager::try_parse_from([
            "voyager",
            "verify",
            "0x2222222222222222222222222222222222222222222222222222222222222222",
            "--field",
            "bytecode",
        ])
        .unwrap();
        let VoyagerSubcommand::Verify(verify) = args.cmd else { panic!("expected verify") };
        assert_eq!(verify.field, Some(VerifyField::Bytecode));

        assert!(Voyager::try_parse_from(["voyager", "verify", "0x1234"]).is_err());
    }

    #[test]
    fn parses_theme() {
        let args = Voyager::try_parse_from(["voyager", "theme", "toggle"]).unwrap();
        let VoyagerSubcommand::Theme(theme) = args.cmd else { panic!("expected theme") };
        assert_eq!(theme.theme, Some(ThemeChoice::Toggle));

        let args = Voyager::try_parse_from(["voyager", "theme"]).unwrap();
        let VoyagerSubcommand::Theme(theme) = args.cmd else { panic!("expected theme") };
        assert_eq!(theme.theme, None);

        assert!(Voyager::try_parse_from(["voyager", "theme", "blue"]).is_err());
    }

    #[test]
    fn parses_history_flags() {
        let args = Voyager::try_parse_from(["voyager", "h", "--json", "--limit", "5"]).unwrap();
        let VoyagerSubcommand::History(history) = args.cmd else { panic!("expected history") };
        assert!(history.json);
        assert_eq!(history.limit, Some(5));
    }

    #[test]
    fn gm_accepts_wallet_options() {
        let args = Voyager::try_parse_from([
            "voyager",
            "gm",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ])
        .unwrap();
        assert!(matches!(args.cmd, VoyagerSubcommand::Gm(_)));
    }
}
