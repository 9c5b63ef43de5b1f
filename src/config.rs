use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeeperConfig {
    pub chain: ChainSettings,
    pub contracts: ContractAddresses,
    pub keeper: KeeperSettings,
    pub transaction: TransactionSettings,
    pub credential: CredentialSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainSettings {
    pub rpc_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractAddresses {
    pub price_feed_address: String,
    pub risk_param_address: String,
    pub fee_accrual_address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeeperSettings {
    /// 32-byte collateral identifier, e.g. "HOT-A".
    pub asset_id: String,
    pub poll_interval_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionSettings {
    pub gas_limit: u64,
    pub max_fee_per_gas_gwei: u64,
}

/// Signing material: either a raw hex private key or a password-protected
/// keystore file. The raw key wins when both are set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialSettings {
    pub private_key: Option<String>,
    pub keystore_path: Option<String>,
    pub keystore_password: Option<String>,
}

impl KeeperConfig {
    pub fn load(path: &str) -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;

        // Simple environment variable substitution
        let content = Self::substitute_env_vars(content)?;

        let config: KeeperConfig =
            toml::from_str(&content).with_context(|| format!("invalid config file {}", path))?;
        Ok(config)
    }

    fn substitute_env_vars(content: String) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
        let mut result = content.clone();

        for cap in re.captures_iter(&content) {
            let var_name = &cap[1];
            if let Ok(value) = env::var(var_name) {
                let placeholder = cap[0].to_string();
                result = result.replace(&placeholder, &value);
            }
        }

        Ok(result)
    }
}
