use crate::utils::constants::{CHAIN_NOT_ADDED_CODE, USER_REJECTED_CODE};
use alloy_primitives::TxHash;
use alloy_transport::{RpcError, TransportErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    // Provider-reported (EIP-1193)
    #[error("chain is not registered in the wallet")]
    ChainNotRegistered,
    #[error("user rejected the request")]
    UserRejected,
    #[error("wallet error {code}: {message}")]
    Provider { code: i64, message: String },

    // Session
    #[error("wallet exposes no account")]
    NoAccount,
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("{0}")]
    Other(String),

    // Transport
    #[error(transparent)]
    Transport(RpcError<TransportErrorKind>),
}

impl WalletError {
    /// Map an EIP-1193 error code to the variants the executor tells apart.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        match code {
            CHAIN_NOT_ADDED_CODE => Self::ChainNotRegistered,
            USER_REJECTED_CODE => Self::UserRejected,
            code => Self::Provider { code, message: message.into() },
        }
    }
}

impl From<RpcError<TransportErrorKind>> for WalletError {
    fn from(error: RpcError<TransportErrorKind>) -> Self {
        match error {
            RpcError::ErrorResp(payload) => Self::from_code(payload.code, payload.message.to_string()),
            err => Self::Transport(err),
        }
    }
}
