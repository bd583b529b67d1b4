use super::wallet::{PendingTransaction, TransactionSigner, TxParams, WalletSession};
use crate::wallet_error::WalletError;
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Every interaction the executor had with a [`MockWallet`], in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletCall {
    SwitchNetwork(u64),
    AcquireSigner(u64),
    SendTransaction { chain_id: u64, params: TxParams },
    Confirm(TxHash),
}

/// Scripted reaction to a network switch request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchBehavior {
    NotRegistered,
    Rejected,
    Fail(String),
}

#[derive(Debug, Default)]
struct MockState {
    active_chain: u64,
    calls: Vec<WalletCall>,
    next_hash: u64,
    switch_failures: HashMap<u64, SwitchBehavior>,
    send_failures: HashMap<Address, String>,
    reverting: Vec<Address>,
    signer_failure: Option<String>,
    signer_chain_override: Option<u64>,
}

/// In-memory wallet session with scriptable failures.
///
/// Signers it hands out check that the wallet is still on their network when sending, like a
/// browser wallet would, so reusing a signer across a switch shows up as a failed send.
#[derive(Clone, Debug)]
pub struct MockWallet {
    account: Address,
    state: Arc<Mutex<MockState>>,
}

impl MockWallet {
    pub fn new(account: Address) -> Self {
        Self { account, state: Arc::new(Mutex::new(MockState::default())) }
    }

    pub fn with_active_chain(self, chain_id: u64) -> Self {
        self.lock().active_chain = chain_id;
        self
    }

    pub fn fail_switch(self, chain_id: u64, behavior: SwitchBehavior) -> Self {
        self.lock().switch_failures.insert(chain_id, behavior);
        self
    }

    /// Sends to `to` are rejected by the wallet with `message`.
    pub fn fail_send_to(self, to: Address, message: impl Into<String>) -> Self {
        self.lock().send_failures.insert(to, message.into());
        self
    }

    /// Sends to `to` are broadcast but revert on chain.
    pub fn revert_to(self, to: Address) -> Self {
        self.lock().reverting.push(to);
        self
    }

    pub fn fail_signer(self, message: impl Into<String>) -> Self {
        self.lock().signer_failure = Some(message.into());
        self
    }

    /// Hand out signers bound to `chain_id` regardless of the active network.
    pub fn signer_on_chain(self, chain_id: u64) -> Self {
        self.lock().signer_chain_override = Some(chain_id);
        self
    }

    pub fn active_chain(&self) -> u64 {
        self.lock().active_chain
    }

    pub fn calls(&self) -> Vec<WalletCall> {
        self.lock().calls.clone()
    }

    pub fn sent(&self) -> Vec<(u64, TxParams)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WalletCall::SendTransaction { chain_id, params } => Some((chain_id, params)),
                _ => None,
            })
            .collect()
    }

    pub fn switches(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WalletCall::SwitchNetwork(chain_id) => Some(chain_id),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WalletSession for MockWallet {
    type Signer = MockSigner;

    fn account(&self) -> Address {
        self.account
    }

    async fn switch_network(&mut self, chain_id: u64) -> Result<(), WalletError> {
        let mut state = self.lock();
        state.calls.push(WalletCall::SwitchNetwork(chain_id));

        match state.switch_failures.get(&chain_id) {
            Some(SwitchBehavior::NotRegistered) => Err(WalletError::ChainNotRegistered),
            Some(SwitchBehavior::Rejected) => Err(WalletError::UserRejected),
            Some(SwitchBehavior::Fail(message)) => Err(WalletError::Other(message.clone())),
            None => {
                state.active_chain = chain_id;
                Ok(())
            }
        }
    }

    async fn signer(&mut self) -> Result<MockSigner, WalletError> {
        let mut state = self.lock();
        let chain_id = state.signer_chain_override.unwrap_or(state.active_chain);
        state.calls.push(WalletCall::AcquireSigner(chain_id));

        if let Some(message) = &state.signer_failure {
            return Err(WalletError::Other(message.clone()));
        }
        Ok(MockSigner { chain_id, state: Arc::clone(&self.state) })
    }
}

#[derive(Debug)]
pub struct MockSigner {
    chain_id: u64,
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl TransactionSigner for MockSigner {
    type Pending = MockPendingTransaction;

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn send_transaction(&self, params: TxParams) -> Result<MockPendingTransaction, WalletError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.calls.push(WalletCall::SendTransaction { chain_id: self.chain_id, params: params.clone() });

        if state.active_chain != self.chain_id {
            return Err(WalletError::Other(format!("stale signer: bound to chain {}, wallet is on {}", self.chain_id, state.active_chain)));
        }
        if let Some(message) = state.send_failures.get(&params.to) {
            return Err(WalletError::Other(message.clone()));
        }

        state.next_hash += 1;
        let tx_hash = TxHash::left_padding_from(&state.next_hash.to_be_bytes());
        let reverts = state.reverting.contains(&params.to);
        Ok(MockPendingTransaction { tx_hash, reverts, state: Arc::clone(&self.state) })
    }
}

#[derive(Debug)]
pub struct MockPendingTransaction {
    tx_hash: TxHash,
    reverts: bool,
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl PendingTransaction for MockPendingTransaction {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn confirm(self) -> Result<TxHash, WalletError> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).calls.push(WalletCall::Confirm(self.tx_hash));

        if self.reverts { Err(WalletError::Reverted(self.tx_hash)) } else { Ok(self.tx_hash) }
    }
}
