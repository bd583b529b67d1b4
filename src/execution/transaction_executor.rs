use super::error::ExecutionError;
use super::events::ExecutionEvent;
use super::outcome::{ExecutionOutcome, RunReport};
use super::wallet::{PendingTransaction, TransactionSigner, TxParams, WalletSession};
use crate::chain::{ChainDescriptor, ChainDirectory};
use crate::planning::{ChainGroup, TransactionRequest, TxKind, generate_plan_hash, group_by_chain};
use alloy_primitives::TxHash;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info, info_span, warn};

/// Runs a planned batch of chain-scoped transactions through a wallet session.
///
/// Execution is strictly sequential: chain groups one after another, and inside a group one
/// request at a time, each awaited until confirmed. The wallet's active network is a single
/// shared value, so nothing here runs concurrently. No step is retried and no step is fatal to
/// the run: every request ends up as exactly one [`ExecutionOutcome`].
#[derive(Debug, Clone, Default)]
pub struct TransactionExecutor {
    events: Option<mpsc::UnboundedSender<ExecutionEvent>>,
}

impl TransactionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, events: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Open a progress channel. Replaces any previously attached sender.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ExecutionEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.events = Some(sender);
        receiver
    }

    /// Execute `requests` against `session`.
    ///
    /// Outcomes come back in grouped-execution order: all requests of the first chain seen, then
    /// all requests of the second chain seen, and so on, each group in input order.
    pub async fn execute<W: WalletSession>(
        &self,
        requests: impl IntoIterator<Item = TransactionRequest>,
        directory: &ChainDirectory,
        session: &mut W,
    ) -> Vec<ExecutionOutcome> {
        let requests: Vec<TransactionRequest> = requests.into_iter().collect();
        let plan = generate_plan_hash(&requests);
        let total = requests.len();
        let groups = group_by_chain(requests);

        let span = info_span!("run", plan = %plan.short(), account = %session.account());
        async move {
            info!("Executing {} requests across {} chains", total, groups.len());
            self.emit(ExecutionEvent::RunStarted { plan, groups: groups.len(), requests: total });

            let mut outcomes = Vec::with_capacity(total);
            for group in groups {
                self.execute_group(group, directory, session, &mut outcomes).await;
            }

            let report = RunReport::from_outcomes(&outcomes);
            info!(succeeded = report.succeeded, failed = report.failed, skipped = report.skipped, "{}", report.summary());
            self.emit(ExecutionEvent::RunFinished(report));

            outcomes
        }
        .instrument(span)
        .await
    }

    async fn execute_group<W: WalletSession>(
        &self,
        group: ChainGroup,
        directory: &ChainDirectory,
        session: &mut W,
        outcomes: &mut Vec<ExecutionOutcome>,
    ) {
        self.emit(ExecutionEvent::GroupStarted { chain: group.chain.clone(), requests: group.len() });

        if !group.has_submittable() {
            debug!(chain = %group.chain, "Nothing to submit, skipping network switch");
            for request in group.requests {
                self.record(ExecutionOutcome::skipped(request), outcomes);
            }
            return;
        }

        let Some(chain) = directory.get(&group.chain) else {
            let error = ExecutionError::UnknownChain(group.chain.clone());
            warn!(chain = %group.chain, "{}", error);
            self.fail_group(group, &error, outcomes);
            return;
        };

        if let Err(err) = session.switch_network(chain.chain_id).await {
            let error = ExecutionError::from_switch(chain, err);
            warn!(chain = %group.chain, chain_id = chain.chain_id, "{}", error);
            self.fail_group(group, &error, outcomes);
            return;
        }
        info!(chain = %group.chain, chain_id = %chain.chain_id_hex(), "Switched to {}", chain.name);
        self.emit(ExecutionEvent::NetworkSwitched { chain: group.chain.clone(), chain_id: chain.chain_id });

        // The switch invalidated any earlier signer; derive a fresh one for this group only.
        let signer = match self.acquire_signer(session, chain).await {
            Ok(signer) => signer,
            Err(error) => {
                warn!(chain = %group.chain, "{}", error);
                self.fail_group(group, &error, outcomes);
                return;
            }
        };

        for request in group.requests {
            let outcome = self.execute_request(&signer, chain, request).await;
            self.record(outcome, outcomes);
        }
    }

    async fn acquire_signer<W: WalletSession>(&self, session: &mut W, chain: &ChainDescriptor) -> Result<W::Signer, ExecutionError> {
        let signer = session
            .signer()
            .await
            .map_err(|source| ExecutionError::SignerUnavailable { name: chain.name.clone(), source })?;

        if signer.chain_id() != chain.chain_id {
            return Err(ExecutionError::SignerChainMismatch { active: signer.chain_id(), expected: chain.chain_id });
        }
        Ok(signer)
    }

    async fn execute_request<S: TransactionSigner>(&self, signer: &S, chain: &ChainDescriptor, request: TransactionRequest) -> ExecutionOutcome {
        match request.kind {
            TxKind::Hold | TxKind::Error => {
                debug!(chain = %request.chain, kind = %request.kind, "Skipping: {}", request.label());
                ExecutionOutcome::skipped(request)
            }
            TxKind::Transfer | TxKind::Fee | TxKind::Bridge => match self.submit(signer, chain, &request).await {
                Ok(tx_hash) => {
                    info!(chain = %request.chain, kind = %request.kind, %tx_hash, "Confirmed: {}", request.label());
                    ExecutionOutcome::success(request, tx_hash)
                }
                Err(error) => {
                    warn!(chain = %request.chain, kind = %request.kind, "{} failed: {}", request.label(), error);
                    ExecutionOutcome::failed(request, &error)
                }
            },
        }
    }

    async fn submit<S: TransactionSigner>(&self, signer: &S, chain: &ChainDescriptor, request: &TransactionRequest) -> Result<TxHash, ExecutionError> {
        let to = request.to.ok_or(ExecutionError::MissingRecipient(request.kind))?;
        let params = TxParams { to, value: request.value, data: request.data.clone(), gas_limit: request.gas_limit };

        debug!(chain = %request.chain, %to, value = %request.value, "Sending transaction");
        let pending = signer.send_transaction(params).await?;

        let tx_hash = pending.tx_hash();
        info!(chain = %request.chain, %tx_hash, "Submitted, waiting for confirmation on {}", chain.name);
        self.emit(ExecutionEvent::Submitted { chain: request.chain.clone(), tx_hash });

        Ok(pending.confirm().await?)
    }

    /// Fail every submittable request of a group with the same error; terminal requests stay skipped.
    fn fail_group(&self, group: ChainGroup, error: &ExecutionError, outcomes: &mut Vec<ExecutionOutcome>) {
        for request in group.requests {
            let outcome = if request.is_terminal() { ExecutionOutcome::skipped(request) } else { ExecutionOutcome::failed(request, error) };
            self.record(outcome, outcomes);
        }
    }

    fn record(&self, outcome: ExecutionOutcome, outcomes: &mut Vec<ExecutionOutcome>) {
        self.emit(ExecutionEvent::Recorded(Box::new(outcome.clone())));
        outcomes.push(outcome);
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}

/// Execute a batch with a default executor (no progress events).
pub async fn execute<W: WalletSession>(
    requests: impl IntoIterator<Item = TransactionRequest>,
    directory: &ChainDirectory,
    session: &mut W,
) -> Vec<ExecutionOutcome> {
    TransactionExecutor::new().execute(requests, directory, session).await
}
