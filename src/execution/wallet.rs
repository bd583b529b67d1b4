use crate::wallet_error::WalletError;
use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

/// Call parameters handed to the wallet for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxParams {
    pub to: Address,
    pub value: U256,
    pub data: Option<Bytes>,
    pub gas_limit: Option<u64>,
}

/// A connected wallet: one account and a single, process-wide "active network".
///
/// The active network is shared mutable state owned by the wallet, so a session is driven by one
/// executor at a time (`&mut self`). A signer obtained from [`WalletSession::signer`] is bound to
/// the network that was active when it was derived; after any switch it is stale and must be
/// derived again.
#[async_trait]
pub trait WalletSession: Send {
    type Signer: TransactionSigner;

    fn account(&self) -> Address;

    /// Ask the wallet to make `chain_id` the active network.
    ///
    /// Fails with [`WalletError::ChainNotRegistered`] when the wallet does not know the network and
    /// with [`WalletError::UserRejected`] when the user declines.
    async fn switch_network(&mut self, chain_id: u64) -> Result<(), WalletError>;

    async fn signer(&mut self) -> Result<Self::Signer, WalletError>;
}

#[async_trait]
pub trait TransactionSigner: Send + Sync {
    type Pending: PendingTransaction;

    /// Network this signer was derived on.
    fn chain_id(&self) -> u64;

    /// Sign and broadcast. Resolves once the wallet hands back a transaction hash.
    async fn send_transaction(&self, params: TxParams) -> Result<Self::Pending, WalletError>;
}

/// Handle to a broadcast transaction.
#[async_trait]
pub trait PendingTransaction: Send {
    fn tx_hash(&self) -> TxHash;

    /// Wait for one confirmation. A reverted transaction is an error.
    async fn confirm(self) -> Result<TxHash, WalletError>;
}
