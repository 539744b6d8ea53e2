use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SipPlan {
    pub name: String,
    pub monthly_contribution: f64,
    pub annual_return_pct: f64,
    pub period_years: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RpcProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub rpc: Option<RpcProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            rpc: Some(RpcProviderConfig {
                base_url: "http://127.0.0.1:8545".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VaultConfig {
    pub contract_address: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        VaultConfig {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub plans: Vec<SipPlan>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub vault: VaultConfig,
    pub currency: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "sipvault")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
