//! Configuration management for the token minter
//!
//! Loaded once at start-up from a TOML file, then environment overrides, then
//! validated. The resulting value is shared read-only with every component.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MinterConfig {
    #[validate]
    pub api: ApiConfig,
    #[validate]
    pub pinning: PinningConfig,
    #[validate]
    pub solana: SolanaConfig,
    pub fee: FeeConfig,
    #[validate]
    pub metadata: MetadataConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    pub bind_address: String,
    /// Directory holding the browser front-end
    pub static_dir: PathBuf,
    /// Scratch directory for uploaded images awaiting pinning
    pub upload_dir: PathBuf,
    #[validate(range(min = 1, max = 100))]
    pub max_upload_size_mb: usize,
    #[validate(range(min = 5, max = 300))]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PinningConfig {
    #[validate(url)]
    pub api_url: String,
    #[validate(url)]
    pub gateway_url: String,
    pub api_key: String,
    pub secret_api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SolanaConfig {
    #[validate(url)]
    pub rpc_url: String,
    pub commitment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub enabled: bool,
    /// Service wallet receiving the fee
    pub wallet: String,
    pub lamports: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MetadataConfig {
    /// Attach an on-chain metadata record to every new mint
    pub enabled: bool,
    pub is_mutable: bool,
    /// Name embedded in the generated token description
    #[validate(length(min = 1, max = 64))]
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub structured_logging: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            static_dir: "./frontend".into(),
            upload_dir: "./uploads".into(),
            max_upload_size_mb: 10,
            request_timeout_secs: 30,
        }
    }
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.pinata.cloud".to_string(),
            gateway_url: "https://gateway.pinata.cloud/ipfs".to_string(),
            api_key: String::new(),
            secret_api_key: String::new(),
        }
    }
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: "confirmed".to_string(),
        }
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wallet: "AS1Zz2Hs2Rk35XPVPwpaUHtEANTEe9DKsC8yHQNjR6Gi".to_string(),
            // 0.04 SOL
            lamports: 40_000_000,
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            is_mutable: false,
            service_name: "BBANG Token Minter".to_string(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl MinterConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// File (or defaults when absent), then environment, then validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found, using defaults: {}", path.display());
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay secrets and deployment-specific values from the environment
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("PINATA_API_KEY") {
            self.pinning.api_key = key;
        }
        if let Some(secret) = lookup("PINATA_SECRET_API_KEY") {
            self.pinning.secret_api_key = secret;
        }
        if let Some(url) = lookup("SOLANA_RPC_URL") {
            self.solana.rpc_url = url;
        }
        if let Some(wallet) = lookup("FEE_WALLET") {
            self.fee.wallet = wallet;
        }
        if let Some(address) = lookup("MINTER_BIND_ADDRESS") {
            self.api.bind_address = address;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        if self.pinning.api_key.is_empty() || self.pinning.secret_api_key.is_empty() {
            return Err(anyhow!("Pinning API credentials cannot be empty"));
        }
        if self.fee.enabled {
            self.fee_wallet()?;
        }
        self.commitment()?;
        Ok(())
    }

    /// Ensure required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.api.upload_dir)?;
        Ok(())
    }

    pub fn fee_wallet(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.fee.wallet)
            .map_err(|e| anyhow!("Invalid fee wallet {}: {}", self.fee.wallet, e))
    }

    pub fn commitment(&self) -> Result<CommitmentConfig> {
        CommitmentConfig::from_str(&self.solana.commitment)
            .map_err(|_| anyhow!("Invalid commitment level: {}", self.solana.commitment))
    }
}
