use crate::config::CredentialSettings;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context, Result};

/// Builds the keeper's signing identity from the configured credential:
/// a raw hex private key, or a password-protected keystore file.
pub fn build_signer(credential: &CredentialSettings) -> Result<PrivateKeySigner> {
    if let Some(key) = &credential.private_key {
        let key = key
            .strip_prefix("0x")
            .or_else(|| key.strip_prefix("0X"))
            .unwrap_or(key);
        let signer: PrivateKeySigner = key.parse().context("invalid private key")?;
        return Ok(signer);
    }

    if let Some(path) = &credential.keystore_path {
        let password = credential
            .keystore_password
            .as_deref()
            .context("keystore_path set but keystore_password missing")?;
        let signer = PrivateKeySigner::decrypt_keystore(path, password)
            .with_context(|| format!("failed to decrypt keystore {}", path))?;
        return Ok(signer);
    }

    bail!("no signing credential configured: set credential.private_key or credential.keystore_path")
}
