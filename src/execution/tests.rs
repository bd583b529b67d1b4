/// Scenario tests for the execution layer
///
/// These drive `TransactionExecutor` against a scripted `MockWallet` and check both the returned
/// outcomes and the exact sequence of wallet calls.

#[cfg(test)]
mod integration_tests {
    use super::super::*;
    use crate::chain::{ChainDescriptor, ChainDirectory};
    use crate::planning::{TransactionRequest, TxKind};
    use alloy_primitives::{Address, Bytes, U256, address};
    use eyre::Result;

    const ETHEREUM: u64 = 1;
    const POLYGON: u64 = 137;
    const FEE_WALLET: Address = address!("0x0000000000000000000000000000000000000fee");

    fn user() -> Address {
        Address::repeat_byte(0xaa)
    }

    fn wallet() -> MockWallet {
        MockWallet::new(Address::repeat_byte(0x01)).with_active_chain(ETHEREUM)
    }

    fn directory() -> ChainDirectory {
        let mut directory = ChainDirectory::new();
        directory.insert("ethereum", ChainDescriptor::new("Ethereum", ETHEREUM, "ETH"));
        directory.insert("polygon", ChainDescriptor::new("Polygon", POLYGON, "MATIC"));
        directory
    }

    fn transfer(chain: &str, value: u64) -> TransactionRequest {
        TransactionRequest::transfer(chain, user(), U256::from(value))
    }

    #[tokio::test]
    async fn test_polygon_switch_declined() -> Result<()> {
        let mut wallet = wallet().fail_switch(POLYGON, SwitchBehavior::Rejected);
        let requests = vec![
            transfer("ethereum", 1000),
            TransactionRequest::fee("ethereum", FEE_WALLET, U256::from(50)),
            transfer("polygon", 2000),
        ];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[0].request.kind, TxKind::Transfer);
        assert!(outcomes[1].is_success());
        assert_eq!(outcomes[1].request.kind, TxKind::Fee);
        assert_ne!(outcomes[0].tx_hash(), outcomes[1].tx_hash());

        assert!(outcomes[2].is_failed());
        assert_eq!(outcomes[2].failure_kind(), Some(FailureKind::SwitchDeclined));
        assert!(outcomes[2].error_message().unwrap().contains("declined"));

        let sent = wallet.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(chain_id, _)| *chain_id == ETHEREUM));
        assert_eq!(sent[1].1.to, FEE_WALLET);
        assert_eq!(sent[1].1.value, U256::from(50));
        Ok(())
    }

    #[tokio::test]
    async fn test_interleaved_chains_return_grouped_order() -> Result<()> {
        let mut wallet = wallet();
        let requests = vec![transfer("ethereum", 1), transfer("polygon", 2), transfer("ethereum", 3)];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        let values: Vec<U256> = outcomes.iter().map(|outcome| outcome.request.value).collect();
        assert_eq!(values, vec![U256::from(1), U256::from(3), U256::from(2)]);
        assert!(outcomes.iter().all(ExecutionOutcome::is_success));

        // One switch per chain group, not per request.
        assert_eq!(wallet.switches(), vec![ETHEREUM, POLYGON]);
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_rederived_after_every_switch() -> Result<()> {
        let mut wallet = wallet();
        let requests = vec![transfer("ethereum", 1), transfer("polygon", 2)];

        let outcomes = execute(requests, &directory(), &mut wallet).await;
        let first = outcomes[0].tx_hash().unwrap();
        let second = outcomes[1].tx_hash().unwrap();

        assert_eq!(
            wallet.calls(),
            vec![
                WalletCall::SwitchNetwork(ETHEREUM),
                WalletCall::AcquireSigner(ETHEREUM),
                WalletCall::SendTransaction {
                    chain_id: ETHEREUM,
                    params: TxParams { to: user(), value: U256::from(1), data: None, gas_limit: None }
                },
                WalletCall::Confirm(first),
                WalletCall::SwitchNetwork(POLYGON),
                WalletCall::AcquireSigner(POLYGON),
                WalletCall::SendTransaction {
                    chain_id: POLYGON,
                    params: TxParams { to: user(), value: U256::from(2), data: None, gas_limit: None }
                },
                WalletCall::Confirm(second),
            ]
        );
        assert_eq!(wallet.active_chain(), POLYGON);
        Ok(())
    }

    #[tokio::test]
    async fn test_terminal_requests_never_reach_wallet() -> Result<()> {
        let mut wallet = wallet();
        let requests = vec![
            TransactionRequest::hold("polygon", "Balance below gas cost"),
            TransactionRequest::new("polygon", TxKind::Error, None, U256::ZERO).with_description("Quote failed"),
        ];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(ExecutionOutcome::is_skipped));
        assert!(wallet.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_hold_between_transfers_is_skipped() -> Result<()> {
        let mut wallet = wallet();
        let requests = vec![transfer("ethereum", 1), TransactionRequest::hold("ethereum", "keep gas"), transfer("ethereum", 2)];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        assert!(outcomes[0].is_success());
        assert!(outcomes[1].is_skipped());
        assert!(outcomes[2].is_success());
        assert_eq!(wallet.sent().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_switch_failure_fails_whole_group_without_signing() -> Result<()> {
        let mut wallet = wallet().fail_switch(POLYGON, SwitchBehavior::Fail("provider disconnected".into()));
        let requests = vec![transfer("polygon", 1), TransactionRequest::hold("polygon", "dust"), transfer("polygon", 2)];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::SwitchFailed));
        assert!(outcomes[1].is_skipped());
        assert_eq!(outcomes[2].failure_kind(), Some(FailureKind::SwitchFailed));
        assert!(outcomes[2].error_message().unwrap().contains("provider disconnected"));

        assert_eq!(wallet.calls(), vec![WalletCall::SwitchNetwork(POLYGON)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_unregistered_network_asks_user_to_add_it() -> Result<()> {
        let mut wallet = wallet().fail_switch(POLYGON, SwitchBehavior::NotRegistered);

        let outcomes = execute(vec![transfer("polygon", 1), transfer("ethereum", 2)], &directory(), &mut wallet).await;

        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::NetworkNotRegistered));
        assert!(outcomes[0].error_message().unwrap().contains("add the network"));
        // The next group still runs.
        assert!(outcomes[1].is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_send_does_not_abort_group() -> Result<()> {
        let rejected = Address::repeat_byte(0xbb);
        let mut wallet = wallet().fail_send_to(rejected, "insufficient funds for gas * price + value");
        let requests = vec![
            TransactionRequest::transfer("ethereum", rejected, U256::from(1)),
            TransactionRequest::fee("ethereum", FEE_WALLET, U256::from(2)),
        ];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::Submission));
        assert_eq!(outcomes[0].error_message(), Some("insufficient funds for gas * price + value"));
        assert!(outcomes[1].is_success());
        assert_eq!(wallet.sent().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_reverted_transaction_is_failed() -> Result<()> {
        let reverting = Address::repeat_byte(0xcc);
        let mut wallet = wallet().revert_to(reverting);
        let bridge = TransactionRequest::bridge("ethereum", reverting, U256::from(5), Bytes::from_static(&[0x12, 0x34])).with_gas_limit(150_000);

        let outcomes = execute(vec![bridge, transfer("ethereum", 6)], &directory(), &mut wallet).await;

        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::Submission));
        assert!(outcomes[0].error_message().unwrap().contains("reverted"));
        assert!(outcomes[1].is_success());

        let (_, params) = &wallet.sent()[0];
        assert_eq!(params.data, Some(Bytes::from_static(&[0x12, 0x34])));
        assert_eq!(params.gas_limit, Some(150_000));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_chain_never_calls_wallet() -> Result<()> {
        let mut wallet = wallet();

        let outcomes = execute(vec![transfer("unichain", 1)], &directory(), &mut wallet).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::UnknownChain));
        assert!(outcomes[0].error_message().unwrap().contains("unichain"));
        assert!(wallet.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_failure_fails_group() -> Result<()> {
        let mut wallet = wallet().fail_signer("wallet locked");

        let outcomes = execute(vec![transfer("ethereum", 1), transfer("ethereum", 2)], &directory(), &mut wallet).await;

        assert!(outcomes.iter().all(|outcome| outcome.failure_kind() == Some(FailureKind::SignerUnavailable)));
        assert!(wallet.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_on_wrong_chain_is_rejected() -> Result<()> {
        let mut wallet = wallet().signer_on_chain(ETHEREUM);

        let outcomes = execute(vec![transfer("polygon", 1)], &directory(), &mut wallet).await;

        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::SignerUnavailable));
        assert!(outcomes[0].error_message().unwrap().contains("expected 137"));
        assert!(wallet.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_recipient_is_invalid() -> Result<()> {
        let mut wallet = wallet();
        let requests = vec![TransactionRequest::new("ethereum", TxKind::Transfer, None, U256::from(1)), transfer("ethereum", 2)];

        let outcomes = execute(requests, &directory(), &mut wallet).await;

        assert_eq!(outcomes[0].failure_kind(), Some(FailureKind::InvalidRequest));
        assert!(outcomes[1].is_success());
        assert_eq!(wallet.sent().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_request_yields_one_outcome() -> Result<()> {
        let mut wallet = wallet().fail_switch(POLYGON, SwitchBehavior::Rejected).fail_send_to(FEE_WALLET, "rejected");
        let requests = vec![
            transfer("polygon", 1),
            transfer("ethereum", 2),
            TransactionRequest::fee("ethereum", FEE_WALLET, U256::from(3)),
            TransactionRequest::hold("base", "no balance"),
            transfer("unichain", 4),
            transfer("polygon", 5),
            TransactionRequest::new("ethereum", TxKind::Error, None, U256::ZERO),
        ];

        let outcomes = execute(requests.clone(), &directory(), &mut wallet).await;
        assert_eq!(outcomes.len(), requests.len());

        // Grouped by first appearance of each chain, plan order inside a group.
        let returned: Vec<&TransactionRequest> = outcomes.iter().map(|outcome| &outcome.request).collect();
        let expected: Vec<&TransactionRequest> =
            [0, 5, 1, 2, 6, 3, 4].into_iter().map(|index| &requests[index]).collect();
        assert_eq!(returned, expected);

        let report = RunReport::from_outcomes(&outcomes);
        assert_eq!(report, RunReport { succeeded: 1, failed: 4, skipped: 2 });
        Ok(())
    }

    #[tokio::test]
    async fn test_progress_events() -> Result<()> {
        let mut wallet = wallet().fail_switch(POLYGON, SwitchBehavior::Rejected);
        let mut executor = TransactionExecutor::new();
        let mut events = executor.subscribe();

        let outcomes = executor.execute(vec![transfer("ethereum", 1), transfer("polygon", 2)], &directory(), &mut wallet).await;
        drop(executor);

        let mut received = Vec::new();
        while let Some(event) = events.recv().await {
            received.push(event);
        }

        assert!(matches!(received.first(), Some(ExecutionEvent::RunStarted { groups: 2, requests: 2, .. })));
        assert!(matches!(
            received.last(),
            Some(ExecutionEvent::RunFinished(RunReport { succeeded: 1, failed: 1, skipped: 0 }))
        ));

        let recorded: Vec<ExecutionOutcome> = received
            .iter()
            .filter_map(|event| match event {
                ExecutionEvent::Recorded(outcome) => Some(outcome.as_ref().clone()),
                _ => None,
            })
            .collect();
        assert_eq!(recorded, outcomes);

        assert!(received.contains(&ExecutionEvent::NetworkSwitched { chain: "ethereum".into(), chain_id: ETHEREUM }));
        assert!(received.contains(&ExecutionEvent::Submitted { chain: "ethereum".into(), tx_hash: outcomes[0].tx_hash().unwrap() }));
        Ok(())
    }
}
