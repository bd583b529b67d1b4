use super::outcome::{ExecutionOutcome, RunReport};
use crate::chain::ChainKey;
use crate::planning::PlanHash;
use alloy_primitives::TxHash;

/// Progress notifications for a UI layer; the executor itself never renders anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionEvent {
    RunStarted { plan: PlanHash, groups: usize, requests: usize },
    GroupStarted { chain: ChainKey, requests: usize },
    NetworkSwitched { chain: ChainKey, chain_id: u64 },
    Submitted { chain: ChainKey, tx_hash: TxHash },
    Recorded(Box<ExecutionOutcome>),
    RunFinished(RunReport),
}
