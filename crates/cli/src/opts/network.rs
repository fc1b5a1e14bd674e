use clap::Parser;
use eyre::Result;
use figment::{
    Metadata, Profile,
    value::{Dict, Map, Value},
};
use serde::Serialize;
use std::path::PathBuf;
use voyager_config::{NetworkDescriptor, NetworkRegistry};

/// Options selecting the network, endpoint and state directory.
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(next_help_heading = "Network options")]
pub struct NetworkOpts {
    /// The network to use, by name or chain id.
    #[arg(long, short, global = true, env = "VOYAGER_NETWORK", value_name = "NETWORK")]
    #[serde(skip)]
    pub network: Option<String>,

    /// Send every request to this RPC endpoint. Disables network switching.
    #[arg(long, short, global = true, env = "VOYAGER_RPC_URL", value_name = "URL")]
    #[serde(skip)]
    pub rpc_url: Option<String>,

    /// Directory holding the activity log, cooldowns, streak and preferences.
    #[arg(long, global = true, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl NetworkOpts {
    /// Resolves `--network`, falling back to `fallback` and then the first registered network.
    pub fn network(
        &self,
        registry: &NetworkRegistry,
        fallback: Option<u64>,
    ) -> Result<&'static NetworkDescriptor> {
        if let Some(query) = &self.network {
            return registry.find_by_name(query).ok_or_else(|| {
                eyre::eyre!("unknown network `{query}`; run `voyager networks` to list them")
            });
        }
        fallback
            .and_then(|id| registry.find(id))
            .or_else(|| registry.iter().next())
            .ok_or_else(|| eyre::eyre!("no networks configured"))
    }
}

impl figment::Provider for NetworkOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("NetworkOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        if let Some(state_dir) = &self.state_dir {
            dict.insert("state_dir".to_string(), Value::serialize(state_dir)?);
        }
        Ok(Map::from([(Profile::Default, dict)]))
    }
}
