//! Subcommands of the `voyager` binary.

pub mod action;
pub mod history;
pub mod networks;
pub mod status;
pub mod streak;
pub mod switch;
pub mod theme;
pub mod verify;
pub mod watch;

use anstyle::{AnsiColor, Effects, Style};
use chrono::Utc;
use comfy_table::{ContentArrangement, Table, presets};
use eyre::{OptionExt, Result, WrapErr};
use std::fmt;
use voyager::{AlloyClient, executor::sync_wallet};
use voyager_cli::{opts::NetworkOpts, utils::LoadConfig};
use voyager_common::{io::style, shell};
use voyager_config::{Config, NetworkDescriptor, NetworkRegistry};
use voyager_state::{StateDir, Store, Theme};
use voyager_wallets::{RpcSession, WalletSession, WalletSigner};

/// Config, state and the active network, shared by every command.
pub struct Context {
    pub config: Config,
    pub registry: NetworkRegistry,
    pub store: Store,
    /// From `--network`, else the last `voyager switch`, else `default_network`.
    pub network: &'static NetworkDescriptor,
    rpc_url: Option<String>,
}

impl Context {
    pub fn load(opts: &NetworkOpts) -> Result<Self> {
        let config = opts.load_config()?;
        let dir = config
            .state_dir()
            .ok_or_eyre("could not determine the home directory; pass --state-dir")?;
        let store = Store::open(StateDir::new(dir), Utc::now());

        let registry = NetworkRegistry::builtin();
        let selected = store.state().preferences.selected_network.or(config.default_network);
        let network = opts.network(&registry, selected)?;
        debug!(network = network.name, chain_id = network.chain_id, "active network");

        Ok(Self { config, registry, store, network, rpc_url: opts.rpc_url.clone() })
    }

    /// A session on the active network. Not connected yet.
    pub fn session(&self, signer: Option<WalletSigner>) -> RpcSession {
        self.session_on(self.network, signer)
    }

    /// A session on `network`. Not connected yet.
    pub fn session_on(
        &self,
        network: &'static NetworkDescriptor,
        signer: Option<WalletSigner>,
    ) -> RpcSession {
        let session = RpcSession::new(signer, network, self.config.rpc_endpoints.clone());
        match &self.rpc_url {
            Some(url) => session.with_pinned_rpc(url.clone()),
            None => session,
        }
    }

    /// Connects `session` and returns a chain client over its provider.
    pub async fn connect(&mut self, session: &mut RpcSession) -> Result<AlloyClient> {
        session
            .connect()
            .await
            .wrap_err_with(|| format!("failed to connect to {}", self.network.name))?;
        sync_wallet(session, &mut self.store);

        let provider = session.provider().cloned().ok_or_eyre("session has no provider")?;
        Ok(AlloyClient::new(provider).with_receipt_timeout(self.config.receipt_timeout()))
    }

    /// The endpoint used for the active network: `--rpc-url`, else the configured override,
    /// else the network default.
    pub fn rpc_url(&self) -> Result<String> {
        match &self.rpc_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.config.rpc_url(self.network)?.into_owned()),
        }
    }

    pub fn theme(&self) -> Theme {
        self.store.state().preferences.theme
    }

    /// A table drawn in the current theme.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        match self.theme() {
            Theme::Dark => table.load_preset(presets::UTF8_FULL_CONDENSED),
            Theme::Light => table.load_preset(presets::ASCII_MARKDOWN),
        };
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// A section heading in the current theme.
    pub fn heading(&self, text: impl fmt::Display) -> String {
        shell::styled(heading_style(self.theme()), text)
    }
}

fn heading_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => style::HEADING,
        Theme::Light => AnsiColor::Blue.on_default().effects(Effects::BOLD),
    }
}
