//! # voyager-config
//!
//! Configuration for the voyager CLI: `voyager.toml` files, `VOYAGER_` environment variables
//! and the registry of supported test networks.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::U256;
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    time::Duration,
};
use voyager_common::fmt::parse_ether;

mod endpoints;
pub use endpoints::RpcEndpoints;

mod error;
pub use error::{ConfigError, ExtractConfigError};

pub mod networks;
pub use networks::{NetworkDescriptor, NetworkRegistry, SUPPORTED_NETWORKS};

pub mod resolve;
pub use resolve::UnresolvedEnvVarError;

/// Voyager configuration.
///
/// Values are merged from, lowest to highest precedence: the defaults,
/// `~/.voyager/voyager.toml`, `./voyager.toml` (or the file named by `VOYAGER_CONFIG`) and
/// `VOYAGER_*` environment variables. Command line flags are merged on top by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the JSON state documents live. Defaults to `~/.voyager/state`.
    pub state_dir: Option<PathBuf>,
    /// Text embedded as calldata in the greeting transaction.
    pub greeting_message: String,
    /// Value of the greeting self-transfer, in ether.
    #[serde(deserialize_with = "deserialize_ether_amount")]
    pub greeting_value: String,
    /// Seconds between balance refreshes in `voyager watch`.
    pub balance_refresh_interval: u64,
    /// Seconds to wait for a balance before showing the sentinel.
    pub balance_timeout: u64,
    /// Seconds to wait for a transaction receipt.
    pub receipt_timeout: u64,
    /// Chain id selected when none was picked before.
    pub default_network: Option<u64>,
    pub rpc_endpoints: RpcEndpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            greeting_message: Self::DEFAULT_GREETING.to_string(),
            greeting_value: "0.00001".to_string(),
            balance_refresh_interval: voyager_common::BALANCE_REFRESH_INTERVAL.as_secs(),
            balance_timeout: voyager_common::BALANCE_TIMEOUT.as_secs(),
            receipt_timeout: voyager_common::RECEIPT_TIMEOUT.as_secs(),
            default_network: None,
            rpc_endpoints: RpcEndpoints::default(),
        }
    }
}

impl Config {
    /// The name of the config file.
    pub const FILE_NAME: &'static str = "voyager.toml";

    /// The name of the directory voyager keeps its global files in.
    pub const VOYAGER_DIR_NAME: &'static str = ".voyager";

    /// Prefix of the environment variables the config reads.
    pub const ENV_PREFIX: &'static str = "VOYAGER_";

    pub const DEFAULT_GREETING: &'static str = "GM Voyager!";

    /// `VOYAGER_*` variables that belong to other parts of the CLI and are not config keys.
    const IGNORED_ENV: &'static [&'static str] =
        &["CONFIG", "PRIVATE_KEY", "KEYSTORE", "KEYSTORE_PASSWORD", "DEBUG", "RPC_URL", "NETWORK"];

    /// Loads the config relative to the current working directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_with_root(&cwd)
    }

    pub fn load_with_root(root: &Path) -> Result<Self, ExtractConfigError> {
        Self::from_provider(Self::figment_with_root(root))
    }

    /// Extracts a config from any figment provider.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        let config: Self = Figment::from(provider).extract()?;
        Ok(config)
    }

    /// Returns the default figment rooted at the current directory.
    pub fn figment() -> Figment {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::figment_with_root(&cwd)
    }

    /// Returns the default figment, reading the local `voyager.toml` from `root`.
    pub fn figment_with_root(root: &Path) -> Figment {
        let mut figment = Figment::from(Self::default());

        if let Some(global) = Self::voyager_dir_toml().filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(global));
        }

        let local =
            Env::var("VOYAGER_CONFIG").map(PathBuf::from).unwrap_or_else(|| root.join(Self::FILE_NAME));
        figment = figment.merge(Toml::file(local));

        figment.merge(Env::prefixed(Self::ENV_PREFIX).ignore(Self::IGNORED_ENV))
    }

    /// Returns the path to voyager's global dir: `~/.voyager/`.
    pub fn voyager_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(Self::VOYAGER_DIR_NAME))
    }

    /// Returns the path to the global config file: `~/.voyager/voyager.toml`.
    pub fn voyager_dir_toml() -> Option<PathBuf> {
        Self::voyager_dir().map(|p| p.join(Self::FILE_NAME))
    }

    /// Returns the path to voyager's keystores dir: `~/.voyager/keystores`.
    pub fn voyager_keystores_dir() -> Option<PathBuf> {
        Some(Self::voyager_dir()?.join("keystores"))
    }

    /// The configured state directory, or `~/.voyager/state`.
    pub fn state_dir(&self) -> Option<PathBuf> {
        self.state_dir.clone().or_else(|| Some(Self::voyager_dir()?.join("state")))
    }

    /// The RPC URL for `network`, honoring `rpc_endpoints` overrides.
    pub fn rpc_url<'a>(
        &'a self,
        network: &'a NetworkDescriptor,
    ) -> Result<Cow<'a, str>, UnresolvedEnvVarError> {
        self.rpc_endpoints.resolve_for(network)
    }

    /// The greeting value in wei.
    pub fn greeting_value_wei(&self) -> eyre::Result<U256> {
        parse_ether(&self.greeting_value)
    }

    pub fn balance_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.balance_refresh_interval.max(1))
    }

    pub fn balance_timeout(&self) -> Duration {
        Duration::from_secs(self.balance_timeout)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout)
    }
}

/// Accepts `"0.001"` as well as a bare `0.001`, which is how env vars arrive.
fn deserialize_ether_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Str(String),
        Int(u64),
        Float(f64),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Str(s) => s,
        Amount::Int(n) => n.to_string(),
        Amount::Float(n) => n.to_string(),
    })
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Voyager Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
