//! Per-network RPC endpoint overrides.

use crate::{
    networks::NetworkDescriptor,
    resolve::{RE_PLACEHOLDER, UnresolvedEnvVarError, interpolate},
};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::BTreeMap, ops::Deref};

/// RPC URLs keyed by chain id or network name.
///
/// ```toml
/// [rpc_endpoints]
/// 11155111 = "https://eth-sepolia.g.alchemy.com/v2/${ALCHEMY_KEY}"
/// "base sepolia" = "https://sepolia.base.org"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RpcEndpoints {
    endpoints: BTreeMap<String, String>,
}

impl RpcEndpoints {
    pub fn new(endpoints: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self { endpoints: endpoints.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Returns the raw override for `network`, if any.
    pub fn get_for(&self, network: &NetworkDescriptor) -> Option<&str> {
        let id = network.chain_id.to_string();
        self.endpoints
            .iter()
            .find(|(key, _)| {
                let key = key.trim();
                key == id || key.eq_ignore_ascii_case(network.name)
            })
            .map(|(_, url)| url.as_str())
    }

    /// Returns the URL to use for `network`, interpolating `${VAR}` placeholders.
    pub fn resolve_for<'a>(
        &'a self,
        network: &'a NetworkDescriptor,
    ) -> Result<Cow<'a, str>, UnresolvedEnvVarError> {
        match self.get_for(network) {
            Some(url) if RE_PLACEHOLDER.is_match(url) => interpolate(url).map(Cow::Owned),
            Some(url) => Ok(Cow::Borrowed(url)),
            None => Ok(Cow::Borrowed(network.rpc_url)),
        }
    }
}

impl Deref for RpcEndpoints {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.endpoints
    }
}
