use super::outcome::FailureKind;
use crate::chain::{ChainDescriptor, ChainKey};
use crate::planning::TxKind;
use crate::wallet_error::WalletError;
use thiserror::Error;

/// Why a request (or a whole chain group) could not be executed.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("unknown chain `{0}`: not present in the chain directory")]
    UnknownChain(ChainKey),
    #[error("network switch failed: {name} (chain id {chain_id}) is not added to the wallet, add the network and retry")]
    NetworkNotRegistered { name: String, chain_id: u64 },
    #[error("network switch failed: user declined switching to {name}")]
    SwitchDeclined { name: String },
    #[error("network switch failed: could not switch to {name}: {source}")]
    SwitchFailed { name: String, source: WalletError },
    #[error("no signer available on {name}: {source}")]
    SignerUnavailable { name: String, source: WalletError },
    #[error("wallet signer is bound to chain id {active}, expected {expected}")]
    SignerChainMismatch { active: u64, expected: u64 },
    #[error("{0} request has no recipient address")]
    MissingRecipient(TxKind),
    #[error(transparent)]
    Submission(#[from] WalletError),
}

impl ExecutionError {
    /// Classify a failed `wallet_switchEthereumChain` call.
    pub fn from_switch(chain: &ChainDescriptor, error: WalletError) -> Self {
        match error {
            WalletError::ChainNotRegistered => Self::NetworkNotRegistered { name: chain.name.clone(), chain_id: chain.chain_id },
            WalletError::UserRejected => Self::SwitchDeclined { name: chain.name.clone() },
            source => Self::SwitchFailed { name: chain.name.clone(), source },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnknownChain(_) => FailureKind::UnknownChain,
            Self::NetworkNotRegistered { .. } => FailureKind::NetworkNotRegistered,
            Self::SwitchDeclined { .. } => FailureKind::SwitchDeclined,
            Self::SwitchFailed { .. } => FailureKind::SwitchFailed,
            Self::SignerUnavailable { .. } | Self::SignerChainMismatch { .. } => FailureKind::SignerUnavailable,
            Self::MissingRecipient(_) => FailureKind::InvalidRequest,
            Self::Submission(_) => FailureKind::Submission,
        }
    }
}
