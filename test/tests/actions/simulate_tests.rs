use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use serde_json::{Value, json};
use tevm_actions::{
    CallEvents, ClientError, SimulateConfig, SimulateError, SimulateHandler,
    events::StepEvent,
};
use tevm_common::{
    Address, Bytes, U256,
    constants::NATIVE_TOKEN_ADDRESS,
    types::{BlockTag, CallResult, CallStatus, Hex},
};
use tevm_test::{DEFAULT_GAS_USED, MockClient};

const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";
const RECIPIENT: &str = "0x00000000000000000000000000000000000000bb";
const TOKEN: &str = "0x00000000000000000000000000000000000000ff";

fn account() -> Address {
    Address::from_low_u64_be(0xaa)
}

fn balance_of_abi() -> Value {
    json!([{
        "type": "function",
        "name": "balanceOf",
        "inputs": [{ "name": "owner", "type": "address" }],
        "outputs": [{ "name": "", "type": "uint256" }],
        "stateMutability": "view"
    }])
}

fn word(value: u64) -> Vec<u8> {
    U256::from(value).to_big_endian().to_vec()
}

#[tokio::test]
async fn calls_run_in_order() {
    let client = MockClient::new().with_balance(account(), U256::from(100));
    let handler = SimulateHandler::new(client);

    let result = handler
        .handle(
            &json!({
                "calls": [
                    { "from": ACCOUNT, "to": RECIPIENT, "value": 30 },
                    {
                        "from": ACCOUNT,
                        "to": TOKEN,
                        "abi": balance_of_abi(),
                        "functionName": "balanceOf",
                        "args": [ACCOUNT]
                    }
                ]
            }),
            true,
        )
        .await
        .unwrap();

    assert_eq!(result.results.len(), 2);
    assert!(result.results.iter().all(|call| call.is_success()));
    // the second call sees the first call's transfer
    assert_eq!(result.results[0].data.to_vec(), word(100));
    assert_eq!(result.results[1].data.to_vec(), word(70));
    assert_eq!(result.results[1].result, Some(json!("70")));
    assert_eq!(result.results[1].gas_used, DEFAULT_GAS_USED);
    assert!(result.asset_changes.is_none());

    let calls = handler.client().calls();
    assert_eq!(calls[0].base.to, Some(Address::from_low_u64_be(0xbb)));
    assert_eq!(calls[0].base.value, Some(U256::from(30)));
    assert_eq!(calls[0].base.create_trace, Some(true));
    assert_eq!(calls[0].base.throw_on_fail, Some(false));
    assert_eq!(calls[0].base.block_tag, Some(BlockTag::Latest));
    assert_eq!(calls[0].data, Some(Hex::empty()));
    assert!(
        calls[1]
            .data
            .as_ref()
            .is_some_and(|data| data.as_str().starts_with("0x70a08231"))
    );
}

#[tokio::test]
async fn failed_encoding_does_not_stop_the_batch() {
    let handler = SimulateHandler::new(MockClient::new());

    let result = handler
        .handle(
            &json!({
                "calls": [
                    { "to": TOKEN, "data": "0x01" },
                    {
                        "to": TOKEN,
                        "abi": balance_of_abi(),
                        "functionName": "balanceOf",
                        "args": ["not an address"]
                    },
                    { "to": TOKEN, "data": "0x03" }
                ]
            }),
            true,
        )
        .await
        .unwrap();

    let statuses: Vec<_> = result.results.iter().map(|call| call.status).collect();
    assert_eq!(
        statuses,
        vec![CallStatus::Success, CallStatus::Failure, CallStatus::Success]
    );
    assert!(
        result.results[1]
            .error
            .as_deref()
            .is_some_and(|error| error.contains("balanceOf"))
    );
    assert_eq!(result.results[1].gas_used, 0);

    let calls = handler.client().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].data.as_ref().map(Hex::as_str), Some("0x03"));
}

#[tokio::test]
async fn execution_and_client_failures_become_entries() {
    let client = MockClient::new();
    client.push_call_result(Ok(CallResult {
        data: Bytes::from_static(&[0x08, 0xc3, 0x79, 0xa0]),
        gas_used: 5000,
        logs: vec![],
        error: Some("execution reverted".to_string()),
    }));
    client.push_call_result(Err(ClientError::Execution("backend down".to_string())));
    let handler = SimulateHandler::new(client);

    let result = handler
        .handle(
            &json!({
                "calls": [
                    {
                        "to": TOKEN,
                        "abi": balance_of_abi(),
                        "functionName": "balanceOf",
                        "args": [ACCOUNT]
                    },
                    { "to": TOKEN },
                    { "to": TOKEN }
                ]
            }),
            true,
        )
        .await
        .unwrap();

    let reverted = &result.results[0];
    assert_eq!(reverted.status, CallStatus::Failure);
    assert_eq!(reverted.gas_used, 5000);
    assert_eq!(reverted.error.as_deref(), Some("execution reverted"));
    assert!(reverted.result.is_none());

    let errored = &result.results[1];
    assert_eq!(errored.status, CallStatus::Failure);
    assert_eq!(errored.error.as_deref(), Some("Execution error: backend down"));

    assert!(result.results[2].is_success());
}

#[tokio::test]
async fn undecodable_result_is_still_a_success() {
    let client = MockClient::new();
    client.push_call_result(Ok(CallResult {
        data: Bytes::from_static(&[0x01]),
        gas_used: 1,
        ..Default::default()
    }));
    let handler = SimulateHandler::new(client);

    let result = handler
        .handle(
            &json!({
                "calls": [{
                    "to": TOKEN,
                    "abi": balance_of_abi(),
                    "functionName": "balanceOf",
                    "args": [ACCOUNT]
                }]
            }),
            true,
        )
        .await
        .unwrap();

    assert!(result.results[0].is_success());
    assert!(result.results[0].result.is_none());
}

#[tokio::test]
async fn native_asset_changes_are_reported() {
    let client = MockClient::new().with_balance(account(), U256::from(1000));
    let handler = SimulateHandler::new(client);

    let result = handler
        .handle(
            &json!({
                "account": ACCOUNT,
                "calls": [
                    { "from": ACCOUNT, "to": RECIPIENT, "value": "0x64" },
                    { "from": ACCOUNT, "to": RECIPIENT, "value": 150 }
                ],
                "traceAssetChanges": true
            }),
            true,
        )
        .await
        .unwrap();

    let changes = result.asset_changes.unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].token.address, NATIVE_TOKEN_ADDRESS);
    assert_eq!(changes[0].token.symbol, "ETH");
    assert_eq!(changes[0].token.decimals, 18);
    assert_eq!(changes[0].value.pre, U256::from(1000));
    assert_eq!(changes[0].value.post, U256::from(750));
    assert_eq!(changes[0].value.diff.to_string(), "-250");
}

#[tokio::test]
async fn unchanged_balance_gives_no_asset_changes() {
    let client = MockClient::new().with_balance(account(), U256::from(1000));
    let handler = SimulateHandler::new(client);

    let result = handler
        .handle(
            &json!({
                "account": ACCOUNT,
                "calls": [{ "from": ACCOUNT, "to": TOKEN, "data": "0x" }],
                "traceAssetChanges": true
            }),
            true,
        )
        .await
        .unwrap();

    assert_eq!(result.asset_changes, Some(vec![]));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["assetChanges"], json!([]));
}

#[tokio::test]
async fn trace_asset_changes_requires_account() {
    let params = json!({
        "calls": [{ "to": TOKEN, "data": "0x" }],
        "traceAssetChanges": true
    });

    let handler = SimulateHandler::new(MockClient::new());
    let error = handler.handle(&params, true).await.unwrap_err();
    let SimulateError::Simulate(error) = error else {
        panic!("expected a simulate error, got {error:?}");
    };
    assert_eq!(error.params, params);
    assert_eq!(error.cause.len(), 1);
    assert_eq!(error.cause[0].name(), "InvalidRequestError");
    assert!(handler.client().calls().is_empty());

    let result = handler.handle(&params, false).await.unwrap();
    assert!(result.results.is_empty());
    assert!(result.error.is_some());
    assert!(handler.client().calls().is_empty());
}

#[tokio::test]
async fn invalid_params_respect_throw_on_fail() {
    let params = json!({ "calls": [{ "to": "0x12" }], "extra": true });
    let handler = SimulateHandler::new(MockClient::new());

    let result = handler.handle(&params, false).await.unwrap();
    let error = result.error.unwrap();
    assert_eq!(error.cause.len(), 2);
    assert!(error.message.starts_with("Invalid simulate params"));

    assert!(matches!(
        handler.handle(&params, true).await,
        Err(SimulateError::Simulate(_))
    ));
}

#[tokio::test]
async fn unusable_block_number_is_a_block_error() {
    let handler = SimulateHandler::new(MockClient::new());
    for block_number in [json!("0x"), json!(format!("0x{}", "1".repeat(20)))] {
        let params = json!({ "calls": [{ "to": TOKEN }], "blockNumber": block_number });
        let error = handler.handle(&params, false).await.unwrap().error.unwrap();
        assert_eq!(error.cause.len(), 1);
        assert_eq!(error.cause[0].name(), "InvalidBlockError");
    }
    assert!(handler.client().calls().is_empty());
}

#[tokio::test]
async fn batch_size_is_limited() {
    let handler = SimulateHandler::new(MockClient::new()).with_config(SimulateConfig {
        max_calls: 2,
        ..Default::default()
    });
    let call = json!({ "to": TOKEN });

    let result = handler
        .handle(&json!({ "calls": [call, call, call] }), false)
        .await
        .unwrap();
    assert!(result.error.unwrap().message.contains("Too many calls"));
    assert!(handler.client().calls().is_empty());

    let result = handler
        .handle(&json!({ "calls": [call, call] }), false)
        .await
        .unwrap();
    assert_eq!(result.results.len(), 2);
}

#[tokio::test]
async fn state_overrides_apply_before_calls() {
    let handler = SimulateHandler::new(MockClient::new());

    let result = handler
        .handle(
            &json!({
                "calls": [{ "from": ACCOUNT, "to": TOKEN }],
                "stateOverrides": [
                    { "address": ACCOUNT, "balance": "0x500" },
                    { "address": TOKEN, "code": "0x6080", "storage": { "0x00": "0x01" } }
                ],
                "blockOverrides": { "number": "0x100" }
            }),
            true,
        )
        .await
        .unwrap();

    // the call observes the overridden balance
    assert_eq!(result.results[0].data.to_vec(), word(0x500));

    let accounts = handler.client().accounts();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].address, account());
    assert_eq!(accounts[0].balance, Some(U256::from(0x500)));
    assert!(accounts[0].deployed_bytecode.is_none());
    assert_eq!(accounts[1].deployed_bytecode.as_ref().map(Hex::as_str), Some("0x6080"));
    assert_eq!(accounts[1].state_diff.as_ref().map(|diff| diff.len()), Some(1));
    assert!(accounts[1].balance.is_none());
}

#[tokio::test]
async fn state_override_failures_propagate() {
    let client = MockClient::new().failing_set_account(ClientError::State("locked".to_string()));
    let handler = SimulateHandler::new(client);
    let params = json!({
        "calls": [{ "to": TOKEN }],
        "stateOverrides": [{ "address": ACCOUNT, "balance": "0x1" }]
    });

    // not even throw_on_fail = false turns this into a result
    let error = handler.handle(&params, false).await.unwrap_err();
    assert!(matches!(error, SimulateError::StateOverride { address, .. } if address == account()));
    assert!(handler.client().calls().is_empty());
}

#[tokio::test]
async fn balance_failures_propagate() {
    let client =
        MockClient::new().failing_get_balance(ClientError::BlockNotFound(BlockTag::Number(7)));
    let handler = SimulateHandler::new(client);

    let error = handler
        .handle(
            &json!({ "account": ACCOUNT, "calls": [], "traceAssetChanges": true }),
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(error, SimulateError::Balance(ClientError::BlockNotFound(_))));
}

#[tokio::test]
async fn events_are_forwarded_to_every_call() {
    let steps = Arc::new(AtomicUsize::new(0));
    let counter = steps.clone();
    let events = CallEvents::default().with_on_step(move |_: &StepEvent| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let handler = SimulateHandler::new(MockClient::new()).with_events(events);

    handler
        .handle(&json!({ "calls": [{ "to": TOKEN }, { "to": TOKEN }] }), true)
        .await
        .unwrap();

    assert_eq!(handler.client().events_seen(), vec![true, true]);
    assert_eq!(steps.load(Ordering::SeqCst), 0);
}
