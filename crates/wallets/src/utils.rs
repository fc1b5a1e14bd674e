use crate::{PendingSigner, WalletSigner, error::PrivateKeyError};
use alloy_primitives::{Address, B256, hex::FromHex};
use eyre::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use voyager_config::Config;

fn ensure_pk_not_env(pk: &str) -> Result<()> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()).into());
    }
    Ok(())
}

/// Validates and sanitizes user inputs, returning configured [WalletSigner].
pub fn create_private_key_signer(private_key_str: &str) -> Result<WalletSigner> {
    let Ok(private_key) = B256::from_hex(private_key_str.trim()) else {
        ensure_pk_not_env(private_key_str)?;
        eyre::bail!("Failed to decode private key")
    };
    match WalletSigner::from_private_key(&private_key) {
        Ok(signer) => Ok(signer),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            eyre::bail!("Failed to create wallet from private key: {err}")
        }
    }
}

/// Creates [WalletSigner] instance from given mnemonic parameters.
///
/// Mnemonic can be either a file path or a mnemonic phrase.
pub fn create_mnemonic_signer(
    mnemonic: &str,
    passphrase: Option<&str>,
    hd_path: Option<&str>,
    index: u32,
) -> Result<WalletSigner> {
    let mnemonic = if Path::new(mnemonic).is_file() {
        fs::read_to_string(mnemonic)?
    } else {
        mnemonic.to_owned()
    };
    let mnemonic = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");

    Ok(WalletSigner::from_mnemonic(&mnemonic, passphrase, hd_path, index)?)
}

/// Resolves `--keystore` or `--account` to a keystore file path.
///
/// Account names are looked up in `~/.voyager/keystores`.
pub fn maybe_get_keystore_path(
    maybe_path: Option<&str>,
    maybe_name: Option<&str>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = maybe_path {
        return Ok(Some(PathBuf::from(path)));
    }

    let Some(name) = maybe_name else { return Ok(None) };

    let keystore_dir = Config::voyager_keystores_dir()
        .ok_or_else(|| eyre::eyre!("Could not find the default keystore directory."))?;
    Ok(Some(find_keystore_by_name(&keystore_dir, name).unwrap_or_else(|| keystore_dir.join(name))))
}

/// Finds a keystore file named `account_name` or `account_name_0x<address>`.
pub fn find_keystore_by_name(keystore_dir: &Path, account_name: &str) -> Option<PathBuf> {
    let direct_path = keystore_dir.join(account_name);
    if direct_path.exists() {
        return Some(direct_path);
    }

    let search_prefix = format!("{account_name}_");
    fs::read_dir(keystore_dir).ok()?.flatten().find_map(|entry| {
        let file_name = entry.file_name();
        let suffix = file_name.to_str()?.strip_prefix(&search_prefix)?;
        Address::parse_checksummed(suffix, None).is_ok().then(|| entry.path())
    })
}

/// Creates keystore signer from given parameters.
///
/// Without a password or password file the keystore is returned as a [PendingSigner] to be
/// unlocked with a prompt.
pub fn create_keystore_signer(
    path: &Path,
    maybe_password: Option<&str>,
    maybe_password_file: Option<&str>,
) -> Result<(Option<WalletSigner>, Option<PendingSigner>)> {
    if !path.exists() {
        eyre::bail!("Keystore file `{path:?}` does not exist")
    }

    if path.is_dir() {
        eyre::bail!(
            "Keystore path `{path:?}` is a directory. Please specify the keystore file directly."
        )
    }

    let password = match (maybe_password, maybe_password_file) {
        (Some(password), _) => Some(password.to_string()),
        (_, Some(password_file)) => {
            let password_file = Path::new(password_file);
            if !password_file.is_file() {
                eyre::bail!("Keystore password file `{password_file:?}` does not exist")
            }
            Some(
                fs::read_to_string(password_file)
                    .wrap_err_with(|| {
                        format!("Failed to read keystore password file at {password_file:?}")
                    })?
                    .trim_end()
                    .to_string(),
            )
        }
        (None, None) => None,
    };

    if let Some(password) = password {
        let wallet = WalletSigner::from_keystore(path, password)
            .wrap_err_with(|| format!("Failed to decrypt keystore {path:?}"))?;
        Ok((Some(wallet), None))
    } else {
        Ok((None, Some(PendingSigner::Keystore(path.to_path_buf()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_private_key_signer() {
        let pk = B256::repeat_byte(0x11);
        let pk_str = pk.to_string();
        assert!(create_private_key_signer(&pk_str).is_ok());
        // skip 0x
        assert!(create_private_key_signer(&pk_str[2..]).is_ok());
        assert!(create_private_key_signer("0xnothex").is_err());
    }

    #[test]
    fn private_key_named_like_env_var() {
        // PATH is set in every test environment.
        let err = create_private_key_signer("PATH").unwrap_err();
        assert!(err.to_string().contains("env var PATH exists"), "{err}");
    }

    #[test]
    fn mnemonic_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnemonic.txt");
        fs::write(&path, "test test test test test test test test test test test junk\n").unwrap();

        let signer = create_mnemonic_signer(path.to_str().unwrap(), None, None, 0).unwrap();
        assert_eq!(
            signer.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn finds_keystore_with_address_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let file = "deployer_0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        fs::write(dir.path().join(file), "{}").unwrap();
        fs::write(dir.path().join("deployer_backup"), "{}").unwrap();

        assert_eq!(find_keystore_by_name(dir.path(), "deployer"), Some(dir.path().join(file)));
        assert_eq!(find_keystore_by_name(dir.path(), "missing"), None);
    }

    #[test]
    fn missing_keystore_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_keystore_signer(&dir.path().join("nope"), Some("pw"), None).unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");

        let err = create_keystore_signer(dir.path(), Some("pw"), None).unwrap_err();
        assert!(err.to_string().contains("is a directory"), "{err}");
    }

    #[test]
    fn keystore_without_password_is_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        fs::write(&path, "{}").unwrap();

        let (signer, pending) = create_keystore_signer(&path, None, None).unwrap();
        assert!(signer.is_none());
        assert!(matches!(pending, Some(PendingSigner::Keystore(p)) if p == path));
    }
}
