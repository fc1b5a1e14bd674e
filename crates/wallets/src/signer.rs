use crate::error::WalletSignerError;
use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::{LocalSignerError, MnemonicBuilder, PrivateKeySigner, coins_bip39::English};
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, WalletSignerError>;

/// Wrapper enum around the signers voyager can use.
#[derive(Clone, Debug)]
pub enum WalletSigner {
    /// Wrapper around local wallet, e.g. private key or keystore.
    Local(PrivateKeySigner),
}

impl WalletSigner {
    pub fn from_private_key(private_key: &alloy_primitives::B256) -> Result<Self> {
        Ok(Self::Local(PrivateKeySigner::from_bytes(private_key)?))
    }

    pub fn from_keystore(path: impl AsRef<Path>, password: impl AsRef<[u8]>) -> Result<Self> {
        match PrivateKeySigner::decrypt_keystore(path, password) {
            Ok(signer) => Ok(Self::Local(signer)),
            Err(LocalSignerError::EthKeystoreError(eth_keystore::KeystoreError::MacMismatch)) => {
                Err(WalletSignerError::IncorrectKeystorePassword)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn from_mnemonic(
        mnemonic: &str,
        passphrase: Option<&str>,
        derivation_path: Option<&str>,
        index: u32,
    ) -> Result<Self> {
        let mut builder = MnemonicBuilder::<English>::default().phrase(mnemonic);

        if let Some(passphrase) = passphrase {
            builder = builder.password(passphrase)
        }

        builder = if let Some(hd_path) = derivation_path {
            builder.derivation_path(hd_path)?
        } else {
            builder.index(index)?
        };

        Ok(Self::Local(builder.build()?))
    }

    pub fn address(&self) -> Address {
        match self {
            Self::Local(signer) => signer.address(),
        }
    }

    /// Pins the signer to `chain_id` so signatures carry EIP-155 replay protection.
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        match self {
            Self::Local(signer) => Self::Local(signer.with_chain_id(Some(chain_id))),
        }
    }

    /// Converts into the wallet filler used by alloy providers.
    pub fn into_wallet(self) -> EthereumWallet {
        match self {
            Self::Local(signer) => EthereumWallet::from(signer),
        }
    }
}

/// Signers that require user action to be obtained.
#[derive(Debug, Clone)]
pub enum PendingSigner {
    Keystore(PathBuf),
    Interactive,
}

impl PendingSigner {
    pub fn unlock(self) -> Result<WalletSigner> {
        match self {
            Self::Keystore(path) => {
                let password = rpassword::prompt_password("Enter keystore password:")?;
                WalletSigner::from_keystore(path, password)
            }
            Self::Interactive => {
                let private_key = rpassword::prompt_password("Enter private key:")?;
                let private_key = private_key.trim().trim_start_matches("0x");
                WalletSigner::from_private_key(&private_key.parse()?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn mnemonic_derivation() {
        let signer = WalletSigner::from_mnemonic(PHRASE, None, None, 0).unwrap();
        assert_eq!(
            signer.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let second = WalletSigner::from_mnemonic(PHRASE, None, None, 1).unwrap();
        assert_eq!(
            second.address(),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
    }
}
