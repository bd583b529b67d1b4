use super::error::ExecutionError;
use crate::planning::TransactionRequest;
use crate::utils::constants::STATUS_MESSAGE_MAX_LEN;
use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which stage of the protocol turned a request into a failure.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownChain,
    NetworkNotRegistered,
    SwitchDeclined,
    SwitchFailed,
    SignerUnavailable,
    InvalidRequest,
    Submission,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success { tx_hash: TxHash },
    Failed { kind: FailureKind, message: String },
    Skipped,
}

/// Result of one planned transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub request: TransactionRequest,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl ExecutionOutcome {
    pub fn success(request: TransactionRequest, tx_hash: TxHash) -> Self {
        Self { request, status: OutcomeStatus::Success { tx_hash } }
    }

    pub fn failed(request: TransactionRequest, error: &ExecutionError) -> Self {
        Self { request, status: OutcomeStatus::Failed { kind: error.kind(), message: error.to_string() } }
    }

    pub fn skipped(request: TransactionRequest) -> Self {
        Self { request, status: OutcomeStatus::Skipped }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, OutcomeStatus::Skipped)
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self.status {
            OutcomeStatus::Success { tx_hash } => Some(tx_hash),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.status {
            OutcomeStatus::Failed { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Error message cut down for a one-line status display. The stored message is untouched.
    pub fn truncated_message(&self) -> Option<String> {
        self.error_message().map(|message| truncate(message, STATUS_MESSAGE_MAX_LEN))
    }
}

fn truncate(message: &str, max_chars: usize) -> String {
    match message.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &message[..end]),
        None => message.to_string(),
    }
}

/// Aggregate counts over a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunReport {
    pub fn from_outcomes(outcomes: &[ExecutionOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut report, outcome| {
            match outcome.status {
                OutcomeStatus::Success { .. } => report.succeeded += 1,
                OutcomeStatus::Failed { .. } => report.failed += 1,
                OutcomeStatus::Skipped => report.skipped += 1,
            }
            report
        })
    }

    /// Requests that were meant to reach the wallet.
    pub fn submittable(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Complete! {} transactions sent successfully.", self.succeeded)
        } else {
            format!("Completed with {}/{} transactions.", self.succeeded, self.submittable())
        }
    }
}
