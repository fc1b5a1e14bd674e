//! The built-in registry of supported test networks.

use alloy_primitives::{Address, TxHash};
use serde::Serialize;
use voyager_common::fmt::explorer_link;

/// Static description of a supported EVM test network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub name: &'static str,
    /// Symbol of the native currency.
    pub symbol: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub faucet_url: &'static str,
    pub logo: &'static str,
    pub accent_color: &'static str,
}

impl NetworkDescriptor {
    pub fn tx_url(&self, hash: &TxHash) -> String {
        explorer_link(self.explorer_url, format_args!("tx/{hash:#x}"))
    }

    pub fn address_url(&self, address: &Address) -> String {
        explorer_link(self.explorer_url, format_args!("address/{address}"))
    }

    /// Explorer page for submitting contract source verification.
    pub fn verify_url(&self, address: &Address) -> String {
        explorer_link(self.explorer_url, format_args!("address/{address}#code"))
    }
}

macro_rules! network {
    ($id:expr, $name:expr, $symbol:expr, $rpc:expr, $explorer:expr, $logo:expr, $color:expr, $faucet:expr $(,)?) => {
        NetworkDescriptor {
            chain_id: $id,
            name: $name,
            symbol: $symbol,
            rpc_url: $rpc,
            explorer_url: $explorer,
            faucet_url: $faucet,
            logo: $logo,
            accent_color: $color,
        }
    };
}

/// All networks voyager knows about, in picker order.
pub static SUPPORTED_NETWORKS: &[NetworkDescriptor] = &[
    network!(11155111, "Sepolia", "ETH", "https://rpc.sepolia.org", "https://sepolia.etherscan.io", "./img/eth.png", "#627EEA", "https://sepoliafaucet.com/"),
    network!(84532, "Base Sepolia", "ETH", "wss://base-sepolia.drpc.org", "https://sepolia.basescan.org", "./img/base.jpg", "#0052FF", "https://faucet.quicknode.com/base/sepolia"),
    network!(80002, "Polygon Amoy", "POL", "https://rpc-amoy.polygon.technology", "https://amoy.polygonscan.com", "https://cryptologos.cc/logos/polygon-matic-logo.png", "#8247E5", "https://faucet.polygon.technology/"),
    network!(97, "BSC Testnet", "tBNB", "https://data-seed-prebsc-1-s1.binance.org:8545", "https://testnet.bscscan.com", "https://cryptologos.cc/logos/bnb-bnb-logo.png", "#F3BA2F", "https://testnet.binance.org/faucet-smart"),
    network!(43113, "Avalanche Fuji", "AVAX", "https://api.avax-test.network/ext/bc/C/rpc", "https://testnet.snowtrace.io", "https://cryptologos.cc/logos/avalanche-avax-logo.png", "#E84142", "https://faucet.avax.network/"),
    network!(421614, "Arbitrum Sepolia", "ETH", "wss://arbitrum-sepolia-rpc.publicnode.com", "https://sepolia.arbiscan.io", "https://cryptologos.cc/logos/arbitrum-arb-logo.png", "#28A0F0", "https://faucet.quicknode.com/arbitrum/sepolia"),
    network!(11155420, "Optimism Sepolia", "ETH", "https://sepolia.optimism.io", "https://sepolia-optimism.etherscan.io", "https://cryptologos.cc/logos/optimism-ethereum-op-logo.png", "#FF0420", "https://faucet.quicknode.com/optimism/sepolia"),
    network!(24101, "Incentiv Testnet", "INC", "https://rpc.incentiv.io", "https://explorer.incentiv.io", "./img/incentiv.webp", "#ff4d4d", "https://portal.incentiv.io/"),
    network!(91342, "Giwa Testnet", "GIWA", "https://sepolia-rpc.giwa.io", "https://explorer.giwa.network", "./img/giwa.webp", "#4dff88", "https://faucet.giwa.io/"),
    network!(20994, "Fluent Testnet", "FLUENT", "https://rpc.testnet.fluent.xyz", "https://explorer.fluent.xyz", "./img/fluent.webp", "#4db8ff", "https://testnet.fluent.xyz/dev-portal"),
    network!(2368, "KiteAI Testnet", "KITE", "https://rpc-testnet.gokite.ai", "https://explorer.kiteai.org", "./img/kite.webp", "#ffcc00", "https://faucet.gokite.ai/"),
    network!(1270, "Irys Testnet", "IRYS", "https://testnet-rpc.irys.xyz/v1/execution-rpc", "https://explorer.irys.xyz", "./img/irys.webp", "#ff66ff", "https://irys.xyz/faucet"),
    network!(688689, "Pharos Testnet", "PHRS", "https://atlantic.dplabs-internal.com", "https://explorer.pharos.network", "./img/pharos.webp", "#00cc99", "https://testnet.pharosnetwork.xyz/"),
    network!(6252, "SANDchain Testnet", "SAND", "https://sandchain-rpc.caldera.xyz/http", "https://explorer.sandchain.io", "./img/sand.webp", "#0084ff", "https://sandchain-hub.caldera.xyz/"),
    network!(5042002, "Arc Testnet", "ARC", "https://rpc.testnet.arc.network", "https://testnet.arcscan.app/", "./img/arc.webp", "#ff9966", "https://faucet.circle.com/"),
    network!(11155931, "RISE Testnet", "RISE", "https://testnet.riselabs.xyz", "https://explorer.rise.xyz", "./img/rise.webp", "#6666ff", "https://portal.risechain.com/"),
    network!(1336, "Kii Testnet", "KII", "https://json-rpc.uno.sentry.testnet.v3.kiivalidator.com", "https://explorer.kii.chain", "./img/kii.webp", "#cc33ff", "https://explorer.kiichain.io/faucet"),
    network!(10778, "X1ECO Testnet", "X1", "https://maculatus-rpc.x1eco.com", "https://explorer.x1eco.com", "./img/x1.webp", "#33cc33", "https://x1ecochain.gitbook.io/x1-ecochain-tech-whitepaper/development-environment/faucet-guide"),
    network!(123123, "Rayls Testnet", "RAYLS", "https://devnet-rpc.rayls.com", "https://explorer.rayls.network", "./img/rayls.webp", "#9933ff", "https://devnet-dapp.rayls.com/"),
    network!(5115, "Citrea Testnet", "CIT", "https://rpc.testnet.citrea.xyz", "https://explorer.citrea.xyz", "./img/citrea.webp", "#ff3399", "https://citrea.xyz/faucet"),
    network!(267, "Neura Testnet", "NEURA", "https://rpc.ankr.com/neura_testnet", "https://explorer.neura.ai", "./img/neura.webp", "#3366ff", "https://neuraverse.neuraprotocol.io/?section=faucet"),
    network!(42429, "Tempo Testnet", "TEMPO", "https://rpc.moderato.tempo.xyz", "https://explorer.tempo.io", "./img/tempo.webp", "#ff6600", "https://docs.tempo.xyz/quickstart/faucet"),
    network!(55931, "Datahaven Testnet", "DATA", "https://services.datahaven-testnet.network/testnet", "https://explorer.datahaven.xyz", "./img/datahaven.webp", "#00ccff", "https://apps.datahaven.xyz/testnet/faucet"),
    network!(984, "OPN Testnet", "OPN", "https://testnet-rpc.iopn.tech", "https://explorer.opn.network", "./img/opn.webp", "#ff3300", "https://faucet.iopn.tech/"),
];

/// Lookup over a list of [`NetworkDescriptor`]s.
#[derive(Clone, Copy, Debug)]
pub struct NetworkRegistry {
    networks: &'static [NetworkDescriptor],
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NetworkRegistry {
    /// The built-in [`SUPPORTED_NETWORKS`].
    pub const fn builtin() -> Self {
        Self { networks: SUPPORTED_NETWORKS }
    }

    pub const fn new(networks: &'static [NetworkDescriptor]) -> Self {
        Self { networks }
    }

    pub fn find(&self, chain_id: u64) -> Option<&'static NetworkDescriptor> {
        self.networks.iter().find(|net| net.chain_id == chain_id)
    }

    /// Resolves a chain id or a case-insensitive network name.
    ///
    /// A name may omit the `Testnet` suffix, e.g. `giwa` for `Giwa Testnet`.
    pub fn find_by_name(&self, query: &str) -> Option<&'static NetworkDescriptor> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u64>() {
            return self.find(id);
        }
        let wanted = normalize(query);
        self.networks.iter().find(|net| {
            let name = normalize(net.name);
            name == wanted || name.strip_suffix("testnet") == Some(wanted.as_str())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static NetworkDescriptor> {
        self.networks.iter()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).map(|c| c.to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use std::collections::HashSet;

    #[test]
    fn registry_is_consistent() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(registry.len(), 24);

        let ids: HashSet<_> = registry.iter().map(|net| net.chain_id).collect();
        assert_eq!(ids.len(), registry.len(), "duplicate chain id");

        for net in registry.iter() {
            assert!(net.rpc_url.starts_with("http") || net.rpc_url.starts_with("ws"), "{}", net.name);
            assert!(net.explorer_url.starts_with("https://"), "{}", net.name);
        }
    }

    #[test]
    fn resolves_by_id_and_name() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(registry.find_by_name("11155111").unwrap().name, "Sepolia");
        assert_eq!(registry.find_by_name("base sepolia").unwrap().chain_id, 84532);
        assert_eq!(registry.find_by_name("base-sepolia").unwrap().chain_id, 84532);
        assert_eq!(registry.find_by_name("Giwa").unwrap().chain_id, 91342);
        assert_eq!(registry.find_by_name("bsc testnet").unwrap().chain_id, 97);
        assert!(registry.find_by_name("31337").is_none());
        assert!(registry.find_by_name("mainnet").is_none());
    }

    #[test]
    fn explorer_urls() {
        let arc = NetworkRegistry::builtin().find(5042002).unwrap();
        let contract = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(
            arc.verify_url(&contract),
            "https://testnet.arcscan.app/address/0x5FbDB2315678afecb367f032d93F642f64180aa3#code"
        );

        let sepolia = NetworkRegistry::builtin().find(11155111).unwrap();
        let hash = b256!("0x0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(
            sepolia.tx_url(&hash),
            "https://sepolia.etherscan.io/tx/0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }
}
