use crate::utils::constants::DEFAULT_CHAINS;
use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Short identifier of a network, e.g. `"ethereum"` or `"polygon"`.
pub type ChainKey = String;

/// Reference data for one target network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDescriptor {
    pub name: String,
    pub chain_id: u64,
    pub symbol: String,
    /// Informational only, transactions always go through the wallet.
    #[serde(default)]
    pub rpc: String,
    #[serde(default)]
    pub color: String,
    /// Block explorer prefix the transaction hash is appended to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<String>,
}

impl ChainDescriptor {
    pub fn new(name: impl Into<String>, chain_id: u64, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), chain_id, symbol: symbol.into(), rpc: String::new(), color: String::new(), explorer: None }
    }

    pub fn with_explorer(mut self, explorer: impl Into<String>) -> Self {
        self.explorer = Some(explorer.into());
        self
    }

    /// `0x`-prefixed hex form used by `wallet_switchEthereumChain`.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    pub fn explorer_url(&self, tx_hash: &TxHash) -> Option<String> {
        self.explorer.as_ref().map(|prefix| format!("{prefix}{tx_hash}"))
    }
}

/// Mapping chain key -> descriptor, as served by the backend's chain list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainDirectory {
    chains: BTreeMap<ChainKey, ChainDescriptor>,
}

impl ChainDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The networks the planner backend supports out of the box.
    pub fn builtin() -> Self {
        DEFAULT_CHAINS
            .iter()
            .map(|&(key, name, chain_id, symbol, rpc, color, explorer)| {
                let descriptor = ChainDescriptor {
                    name: name.to_string(),
                    chain_id,
                    symbol: symbol.to_string(),
                    rpc: rpc.to_string(),
                    color: color.to_string(),
                    explorer: Some(explorer.to_string()),
                };
                (key.to_string(), descriptor)
            })
            .collect()
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, key: impl Into<ChainKey>, descriptor: ChainDescriptor) -> Option<ChainDescriptor> {
        self.chains.insert(key.into(), descriptor)
    }

    pub fn get(&self, key: &str) -> Option<&ChainDescriptor> {
        self.chains.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.chains.contains_key(key)
    }

    pub fn find_by_chain_id(&self, chain_id: u64) -> Option<(&str, &ChainDescriptor)> {
        self.chains.iter().find(|(_, chain)| chain.chain_id == chain_id).map(|(key, chain)| (key.as_str(), chain))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChainDescriptor)> {
        self.chains.iter().map(|(key, chain)| (key.as_str(), chain))
    }

    /// Layer `overrides` on top of this directory. Entries with the same key are replaced.
    pub fn merged(mut self, overrides: ChainDirectory) -> Self {
        self.chains.extend(overrides.chains);
        self
    }
}

impl FromIterator<(ChainKey, ChainDescriptor)> for ChainDirectory {
    fn from_iter<I: IntoIterator<Item = (ChainKey, ChainDescriptor)>>(iter: I) -> Self {
        Self { chains: iter.into_iter().collect() }
    }
}
