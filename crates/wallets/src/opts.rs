use crate::{
    PendingSigner, WalletSigner,
    utils::{
        create_keystore_signer, create_mnemonic_signer, create_private_key_signer,
        maybe_get_keystore_path,
    },
};
use clap::{ArgGroup, Parser};
use eyre::Result;
use serde::Serialize;

/// The wallet options a user can connect with.
///
/// Exactly one source is used, checked in this order: keystore (`--keystore` or `--account`),
/// interactive prompt, raw private key, mnemonic. Supplying none leaves the session
/// disconnected.
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(
    next_help_heading = "Wallet options",
    group(ArgGroup::new("keystore_source").args(["keystore_path", "keystore_account_name"]))
)]
pub struct WalletOpts {
    /// Open an interactive prompt to enter your private key.
    #[arg(long, short)]
    pub interactive: bool,

    /// Use the provided private key.
    #[arg(long, value_name = "RAW_PRIVATE_KEY", env = "VOYAGER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Use the mnemonic phrase of mnemonic file at the specified path.
    #[arg(long, alias = "mnemonic-path")]
    pub mnemonic: Option<String>,

    /// Use a BIP39 passphrase for the mnemonic.
    #[arg(long, value_name = "PASSPHRASE")]
    pub mnemonic_passphrase: Option<String>,

    /// The wallet derivation path.
    #[arg(long = "mnemonic-derivation-path", alias = "hd-path", value_name = "PATH")]
    pub hd_path: Option<String>,

    /// Use the private key from the given mnemonic index.
    #[arg(long, conflicts_with = "hd_path", default_value_t = 0, value_name = "INDEX")]
    pub mnemonic_index: u32,

    /// Use the keystore at the specified path.
    #[arg(
        long = "keystore",
        value_name = "PATH",
        env = "VOYAGER_KEYSTORE",
        conflicts_with = "keystore_account_name"
    )]
    pub keystore_path: Option<String>,

    /// Use a keystore from the default keystores folder (~/.voyager/keystores) by its filename.
    #[arg(long = "account", value_name = "ACCOUNT_NAME", env = "VOYAGER_KEYSTORE_ACCOUNT")]
    pub keystore_account_name: Option<String>,

    /// The keystore password.
    #[arg(
        long = "password",
        requires = "keystore_source",
        value_name = "PASSWORD",
        env = "VOYAGER_KEYSTORE_PASSWORD",
        hide_env_values = true
    )]
    pub keystore_password: Option<String>,

    /// The keystore password file path.
    #[arg(
        long = "password-file",
        requires = "keystore_source",
        value_name = "PASSWORD_FILE",
        conflicts_with = "keystore_password"
    )]
    pub keystore_password_file: Option<String>,
}

impl WalletOpts {
    /// Builds the signer from the given options, or `None` if no wallet source was supplied.
    pub fn signer(&self) -> Result<Option<WalletSigner>> {
        trace!("start finding signer");

        let keystore = maybe_get_keystore_path(
            self.keystore_path.as_deref(),
            self.keystore_account_name.as_deref(),
        )?;

        let signer = if let Some(path) = keystore {
            match create_keystore_signer(
                &path,
                self.keystore_password.as_deref(),
                self.keystore_password_file.as_deref(),
            )? {
                (Some(signer), _) => signer,
                (None, Some(pending)) => pending.unlock()?,
                (None, None) => eyre::bail!("Failed to open keystore {path:?}"),
            }
        } else if self.interactive {
            PendingSigner::Interactive.unlock()?
        } else if let Some(private_key) = &self.private_key {
            trace!("using private key");
            create_private_key_signer(private_key)?
        } else if let Some(mnemonic) = &self.mnemonic {
            trace!("using mnemonic");
            create_mnemonic_signer(
                mnemonic,
                self.mnemonic_passphrase.as_deref(),
                self.hd_path.as_deref(),
                self.mnemonic_index,
            )?
        } else {
            return Ok(None);
        };

        Ok(Some(signer))
    }
}
