/// Planning Layer
///
/// Typed view of what the planner backend hands over: the chain-scoped transaction
/// requests of one aggregation run, and the grouping the executor runs them in.

pub mod grouping;
pub mod plan;
pub mod plan_hash;
pub mod request;

pub use grouping::{ChainGroup, group_by_chain};
pub use plan::{Plan, PlanError};
pub use plan_hash::{PlanHash, generate_plan_hash};
pub use request::{RequestFormatError, TransactionRequest, TxKind};
