//! Everything needed to verify a deployed mock contract on a block explorer.

use crate::action::{DEPLOYABLE_CONTRACT_ABI, DEPLOYABLE_CONTRACT_BYTECODE, DEPLOYABLE_CONTRACT_NAME};
use alloy_primitives::{Address, Bytes, TxHash};
use serde::Serialize;
use voyager_config::NetworkRegistry;
use voyager_state::{ActionKind, TransactionLog, TransactionRecord, TxStatus};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("no transaction {0} in the activity log")]
    UnknownTransaction(TxHash),
    #[error("transaction {0} is not a contract deployment")]
    NotADeployment(TxHash),
    #[error("deployment {hash} is {status}, only confirmed deployments can be verified")]
    NotConfirmed { hash: TxHash, status: TxStatus },
    #[error("deployment {0} has no recorded contract address")]
    MissingAddress(TxHash),
    #[error("deployment {hash} was made on {network}, which is not a supported network")]
    UnknownNetwork { hash: TxHash, network: String },
}

/// A single piece of the verification package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum VerifyField {
    Address,
    Name,
    Abi,
    Bytecode,
    Url,
}

/// Contract address, name, ABI and bytecode of a confirmed deployment, plus the explorer page
/// where the source can be submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPackage {
    pub address: Address,
    pub name: &'static str,
    pub network_name: String,
    /// Pretty-printed ABI JSON.
    pub abi: String,
    pub bytecode: Bytes,
    pub verify_url: String,
}

impl VerificationPackage {
    /// Builds the package for the deployment `hash` in `log`.
    pub fn from_log(
        log: &TransactionLog,
        hash: &TxHash,
        registry: &NetworkRegistry,
    ) -> Result<Self, VerifyError> {
        let record = log.get(hash).ok_or(VerifyError::UnknownTransaction(*hash))?;
        Self::from_record(record, registry)
    }

    /// The explorer page comes from the network the record was made on.
    pub fn from_record(
        record: &TransactionRecord,
        registry: &NetworkRegistry,
    ) -> Result<Self, VerifyError> {
        if record.action != ActionKind::Deploy {
            return Err(VerifyError::NotADeployment(record.hash));
        }
        if record.status != TxStatus::Confirmed {
            return Err(VerifyError::NotConfirmed { hash: record.hash, status: record.status });
        }
        let address =
            record.deployed_contract_address.ok_or(VerifyError::MissingAddress(record.hash))?;
        let network = registry.find_by_name(&record.network_name).ok_or_else(|| {
            VerifyError::UnknownNetwork { hash: record.hash, network: record.network_name.clone() }
        })?;

        Ok(Self {
            address,
            name: DEPLOYABLE_CONTRACT_NAME,
            network_name: record.network_name.clone(),
            abi: pretty_abi(),
            bytecode: DEPLOYABLE_CONTRACT_BYTECODE,
            verify_url: network.verify_url(&address),
        })
    }

    /// Renders one field raw, for piping into a clipboard tool.
    pub fn field(&self, field: VerifyField) -> String {
        match field {
            VerifyField::Address => self.address.to_checksum(None),
            VerifyField::Name => self.name.to_string(),
            VerifyField::Abi => self.abi.clone(),
            VerifyField::Bytecode => self.bytecode.to_string(),
            VerifyField::Url => self.verify_url.clone(),
        }
    }
}

fn pretty_abi() -> String {
    serde_json::from_str::<serde_json::Value>(DEPLOYABLE_CONTRACT_ABI)
        .and_then(|abi| serde_json::to_string_pretty(&abi))
        .unwrap_or_else(|_| DEPLOYABLE_CONTRACT_ABI.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use chrono::Utc;

    const HASH: TxHash = b256!("0x2222222222222222222222222222222222222222222222222222222222222222");
    const CONTRACT: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const REGISTRY: NetworkRegistry = NetworkRegistry::builtin();

    fn deployment(status: TxStatus) -> TransactionRecord {
        let mut record = TransactionRecord::pending(
            HASH,
            ActionKind::Deploy,
            "Arc Testnet",
            "https://testnet.arcscan.app/",
            Utc::now(),
        );
        record.status = status;
        record.deployed_contract_address = Some(CONTRACT);
        record
    }

    #[test]
    fn package_for_confirmed_deploy() {
        let package = VerificationPackage::from_record(&deployment(TxStatus::Confirmed), &REGISTRY).unwrap();
        assert_eq!(package.address, CONTRACT);
        assert_eq!(package.name, "VoyagerToken");
        assert_eq!(package.abi, "[]");
        assert_eq!(package.bytecode, DEPLOYABLE_CONTRACT_BYTECODE);
        assert_eq!(
            package.field(VerifyField::Url),
            "https://testnet.arcscan.app/address/0x5FbDB2315678afecb367f032d93F642f64180aa3#code"
        );
        assert_eq!(package.field(VerifyField::Address), "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert!(package.field(VerifyField::Bytecode).starts_with("0x6080604052"));
    }

    #[test]
    fn rejects_unverifiable_records() {
        let err = VerificationPackage::from_record(&deployment(TxStatus::Pending), &REGISTRY).unwrap_err();
        assert_eq!(err, VerifyError::NotConfirmed { hash: HASH, status: TxStatus::Pending });

        let mut greeting = deployment(TxStatus::Confirmed);
        greeting.action = ActionKind::Greet;
        assert_eq!(
            VerificationPackage::from_record(&greeting, &REGISTRY).unwrap_err(),
            VerifyError::NotADeployment(HASH)
        );

        let mut no_address = deployment(TxStatus::Confirmed);
        no_address.deployed_contract_address = None;
        assert_eq!(
            VerificationPackage::from_record(&no_address, &REGISTRY).unwrap_err(),
            VerifyError::MissingAddress(HASH)
        );

        let log = TransactionLog::default();
        assert_eq!(
            VerificationPackage::from_log(&log, &HASH, &REGISTRY).unwrap_err(),
            VerifyError::UnknownTransaction(HASH)
        );

        let mut retired = deployment(TxStatus::Confirmed);
        retired.network_name = "Goerli".to_string();
        assert_eq!(
            VerificationPackage::from_record(&retired, &REGISTRY).unwrap_err(),
            VerifyError::UnknownNetwork { hash: HASH, network: "Goerli".to_string() }
        );
    }
}
