use super::plan_hash::{PlanHash, generate_plan_hash};
use super::request::TransactionRequest;
use crate::chain::ChainDirectory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("planner rejected the request: {0}")]
    Backend(String),
    #[error("malformed plan: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Response of the planner endpoint: the ordered transactions to run, plus free-form
/// instructions for the user (bridge hints, delays).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub transactions: Vec<TransactionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Plan {
    pub fn new(transactions: Vec<TransactionRequest>) -> Self {
        Self { transactions, ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PlanError> {
        let plan: Plan = serde_json::from_str(json)?;
        plan.into_checked()
    }

    /// Turns a backend-reported error into `PlanError::Backend`.
    pub fn into_checked(self) -> Result<Self, PlanError> {
        match self.error {
            Some(error) => Err(PlanError::Backend(error)),
            None => Ok(self),
        }
    }

    pub fn fingerprint(&self) -> PlanHash {
        generate_plan_hash(&self.transactions)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Requests that will reach the wallet if everything goes well.
    pub fn submittable_count(&self) -> usize {
        self.transactions.iter().filter(|tx| !tx.is_terminal()).count()
    }

    /// Chain keys referenced by submittable requests that `directory` does not know.
    pub fn unknown_chains<'a>(&'a self, directory: &ChainDirectory) -> BTreeSet<&'a str> {
        self.transactions
            .iter()
            .filter(|tx| !tx.is_terminal() && !directory.contains(&tx.chain))
            .map(|tx| tx.chain.as_str())
            .collect()
    }

    pub fn into_transactions(self) -> Vec<TransactionRequest> {
        self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::TxKind;

    const AGGREGATE_RESPONSE: &str = r#"{
        "transactions": [
            {"chain_key": "ethereum", "type": "transfer", "to": "0x00000000000000000000000000000000000000aa", "value": "1000", "description": "Send dust"},
            {"chain_key": "ethereum", "type": "fee", "to": "0x0000000000000000000000000000000000000fee", "value": "50", "description": "Service fee"},
            {"chain_key": "fantom", "type": "hold", "description": "Balance too low"},
            {"chain_key": "unichain", "type": "transfer", "to": "0x00000000000000000000000000000000000000aa", "value": "7"}
        ],
        "instructions": {"bridge": "Funds arrive on Base in ~2 minutes"}
    }"#;

    #[test]
    fn test_parse_aggregate_response() {
        let plan = Plan::from_json_str(AGGREGATE_RESPONSE).unwrap();

        assert_eq!(plan.transactions.len(), 4);
        assert_eq!(plan.submittable_count(), 3);
        assert_eq!(plan.transactions[2].kind, TxKind::Hold);
        assert!(plan.instructions.is_some());

        let unknown = plan.unknown_chains(&ChainDirectory::builtin());
        assert_eq!(unknown.into_iter().collect::<Vec<_>>(), vec!["unichain"]);
    }

    #[test]
    fn test_backend_error() {
        let result = Plan::from_json_str(r#"{"error": "Address required"}"#);
        assert!(matches!(result, Err(PlanError::Backend(message)) if message == "Address required"));
    }

    #[test]
    fn test_empty_plan() {
        let plan = Plan::from_json_str(r#"{"transactions": []}"#).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.fingerprint(), Plan::default().fingerprint());
    }
}
