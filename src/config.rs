use crate::chain::ChainDirectory;
use crate::utils::config_loader::{
    LoadConfigError, OptionalSweepConfigLoader, SweepConfigLoader, SweepConfigLoaderSync, load_from_file, load_from_file_sync,
};
use crate::utils::constants::{DEFAULT_CONFIRMATION_POLL_INTERVAL_MS, DEFAULT_WALLET_RPC_URL};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Layout of `dust-sweep.toml`.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct SweepConfigRoot {
    #[serde(default)]
    pub executor: ExecutorConfig,
    /// Added to, or replacing entries of, the built-in chain list.
    pub chains: Option<ChainDirectory>,
}

impl SweepConfigRoot {
    /// Built-in networks with the `[chains]` section layered on top.
    pub fn chain_directory(&self) -> ChainDirectory {
        with_builtin_chains(self.chains.clone())
    }
}

pub fn with_builtin_chains(configured: Option<ChainDirectory>) -> ChainDirectory {
    match configured {
        Some(chains) => ChainDirectory::builtin().merged(chains),
        None => ChainDirectory::builtin(),
    }
}

/// Configuration for talking to the wallet during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExecutorConfig {
    /// JSON-RPC endpoint of the wallet (EIP-1193 methods over HTTP)
    pub wallet_rpc_url: String,
    /// How often a submitted transaction's receipt is polled
    pub confirmation_poll_interval_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            wallet_rpc_url: DEFAULT_WALLET_RPC_URL.to_string(),
            confirmation_poll_interval_ms: DEFAULT_CONFIRMATION_POLL_INTERVAL_MS,
        }
    }
}

impl ExecutorConfig {
    /// Override fields with `WALLET_RPC_URL` / `CONFIRMATION_POLL_INTERVAL_MS` when set.
    pub fn apply_env(&mut self) -> eyre::Result<()> {
        if let Ok(wallet_rpc_url) = std::env::var("WALLET_RPC_URL") {
            if !wallet_rpc_url.starts_with("http://") && !wallet_rpc_url.starts_with("https://") {
                return Err(eyre::eyre!("Invalid WALLET_RPC_URL: expected an http(s) url, got {}", wallet_rpc_url));
            }
            self.wallet_rpc_url = wallet_rpc_url;
        }

        if let Ok(interval_str) = std::env::var("CONFIRMATION_POLL_INTERVAL_MS") {
            self.confirmation_poll_interval_ms =
                interval_str.parse().map_err(|e| eyre::eyre!("Invalid CONFIRMATION_POLL_INTERVAL_MS: {}", e))?;
        }

        Ok(())
    }

    pub fn confirmation_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_poll_interval_ms)
    }
}

#[async_trait]
impl SweepConfigLoader for ExecutorConfig {
    type SectionType = ExecutorConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: SweepConfigRoot = load_from_file(file_name).await?;
        Ok(root.executor)
    }
}

impl SweepConfigLoaderSync for ExecutorConfig {
    type SectionType = ExecutorConfig;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let root: SweepConfigRoot = load_from_file_sync(file_name)?;
        Ok(root.executor)
    }
}

#[async_trait]
impl OptionalSweepConfigLoader for ChainDirectory {
    type SectionType = ChainDirectory;

    async fn load_optional_section_from_file(file_name: String) -> Result<Option<Self::SectionType>, LoadConfigError> {
        let root: SweepConfigRoot = load_from_file(file_name).await?;
        Ok(root.chains)
    }
}
