// Two-Layer Architecture
pub mod planning;   // Planning Layer: planner output, request kinds, chain grouping
pub mod execution;  // Execution Layer: network switching, signing, confirmation, outcomes

// Reference data, configuration and common utilities
pub mod chain;
pub mod config;
pub mod utils;
pub mod wallet_error;

// Re-export key components from each layer
pub use chain::{ChainDescriptor, ChainDirectory, ChainKey};
pub use config::{ExecutorConfig, SweepConfigRoot};
pub use execution::{
    ExecutionError, ExecutionEvent, ExecutionOutcome, FailureKind, MockWallet, OutcomeStatus, PendingTransaction, RpcWallet,
    RunReport, TransactionExecutor, TransactionSigner, TxParams, WalletSession, execute,
};
pub use planning::{ChainGroup, Plan, PlanError, PlanHash, TransactionRequest, TxKind, group_by_chain};
pub use wallet_error::WalletError;
