use super::wallet::{PendingTransaction, TransactionSigner, TxParams, WalletSession};
use crate::config::ExecutorConfig;
use crate::wallet_error::WalletError;
use alloy_primitives::{Address, Bytes, TxHash, U64, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams {
    chain_id: U64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletTransaction {
    from: Address,
    to: Address,
    value: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<U64>,
    chain_id: U64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptStatus {
    #[serde(default)]
    status: Option<U64>,
    #[serde(default)]
    block_number: Option<U64>,
}

/// Wallet session over a JSON-RPC endpoint that speaks the EIP-1193 wallet methods
/// (`eth_requestAccounts`, `wallet_switchEthereumChain`, `eth_sendTransaction`), such as a
/// desktop wallet's local RPC port. Keys never leave the wallet.
#[derive(Clone)]
pub struct RpcWallet {
    provider: DynProvider,
    account: Address,
    poll_interval: Duration,
}

impl RpcWallet {
    /// Connect and request account access. The first exposed account is used.
    pub async fn connect(config: &ExecutorConfig) -> Result<Self, WalletError> {
        let provider = ProviderBuilder::new().connect(&config.wallet_rpc_url).await?.erased();
        let wallet = Self::from_provider(provider, config.confirmation_poll_interval()).await?;

        info!(account = %wallet.account, url = %config.wallet_rpc_url, "Wallet connected");
        Ok(wallet)
    }

    /// Request account access over an already built provider.
    pub async fn from_provider(provider: DynProvider, poll_interval: Duration) -> Result<Self, WalletError> {
        let accounts: Vec<Address> = provider.raw_request("eth_requestAccounts".into(), serde_json::json!([])).await?;
        let account = accounts.first().copied().ok_or(WalletError::NoAccount)?;
        Ok(Self { provider, account, poll_interval })
    }

    pub async fn active_chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.provider.get_chain_id().await?)
    }
}

#[async_trait]
impl WalletSession for RpcWallet {
    type Signer = RpcSigner;

    fn account(&self) -> Address {
        self.account
    }

    async fn switch_network(&mut self, chain_id: u64) -> Result<(), WalletError> {
        debug!(chain_id, "wallet_switchEthereumChain");
        let params = vec![SwitchChainParams { chain_id: U64::from(chain_id) }];
        let _: serde_json::Value = self.provider.raw_request("wallet_switchEthereumChain".into(), params).await?;
        Ok(())
    }

    async fn signer(&mut self) -> Result<RpcSigner, WalletError> {
        let chain_id = self.active_chain_id().await?;
        Ok(RpcSigner { provider: self.provider.clone(), from: self.account, chain_id, poll_interval: self.poll_interval })
    }
}

/// Signs through the wallet on the network that was active when it was derived.
///
/// Every transaction carries that `chainId`, so a wallet that has since moved to another network
/// rejects it instead of broadcasting on the wrong chain.
#[derive(Clone)]
pub struct RpcSigner {
    provider: DynProvider,
    from: Address,
    chain_id: u64,
    poll_interval: Duration,
}

#[async_trait]
impl TransactionSigner for RpcSigner {
    type Pending = RpcPendingTransaction;

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn send_transaction(&self, params: TxParams) -> Result<RpcPendingTransaction, WalletError> {
        let tx = WalletTransaction {
            from: self.from,
            to: params.to,
            value: params.value,
            data: params.data,
            gas: params.gas_limit.map(U64::from),
            chain_id: U64::from(self.chain_id),
        };

        let tx_hash: TxHash = self.provider.raw_request("eth_sendTransaction".into(), vec![tx]).await?;
        Ok(RpcPendingTransaction { provider: self.provider.clone(), tx_hash, poll_interval: self.poll_interval })
    }
}

#[derive(Clone)]
pub struct RpcPendingTransaction {
    provider: DynProvider,
    tx_hash: TxHash,
    poll_interval: Duration,
}

#[async_trait]
impl PendingTransaction for RpcPendingTransaction {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn confirm(self) -> Result<TxHash, WalletError> {
        loop {
            let receipt: Option<ReceiptStatus> =
                self.provider.raw_request("eth_getTransactionReceipt".into(), vec![self.tx_hash]).await?;

            match receipt {
                Some(ReceiptStatus { block_number: Some(block), status }) => {
                    debug!(tx_hash = %self.tx_hash, %block, "Receipt found");
                    return if status == Some(U64::ZERO) { Err(WalletError::Reverted(self.tx_hash)) } else { Ok(self.tx_hash) };
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}
