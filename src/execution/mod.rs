/// Execution Layer
///
/// This layer is responsible for:
/// - Switching the wallet to each chain of a plan, one chain group at a time
/// - Signing and broadcasting every submittable request, awaiting confirmation
/// - Turning every failure into a per-request outcome instead of aborting the run
/// - The wallet seam (`WalletSession`) with a JSON-RPC and an in-memory implementation

pub mod error;
pub mod events;
pub mod mock_wallet;
pub mod outcome;
pub mod rpc_wallet;
pub mod transaction_executor;
pub mod wallet;

#[cfg(test)]
mod tests;

pub use error::ExecutionError;
pub use events::ExecutionEvent;
pub use mock_wallet::{MockWallet, SwitchBehavior, WalletCall};
pub use outcome::{ExecutionOutcome, FailureKind, OutcomeStatus, RunReport};
pub use rpc_wallet::RpcWallet;
pub use transaction_executor::{TransactionExecutor, execute};
pub use wallet::{PendingTransaction, TransactionSigner, TxParams, WalletSession};
