use serde_json::json;
use tevm_common::{
    Address, Bytes, U256,
    constants::NATIVE_TOKEN_ADDRESS,
    types::{
        AssetChange, AssetValue, BlockTag, CallParams, CallStatus, LoadStateParams,
        SimulateCallResult, TokenInfo, TransactionIntent, TransactionMode,
    },
};

#[test]
fn call_params_flatten_base_fields() {
    let params: CallParams = serde_json::from_value(json!({
        "to": "0x00000000000000000000000000000000000000ff",
        "caller": "0x00000000000000000000000000000000000000aa",
        "data": "0xa9059cbb",
        "gas": 30000,
        "blockTag": "0x10",
        "createTransaction": "on-success",
        "stateOverrideSet": {
            "0x00000000000000000000000000000000000000aa": { "balance": "0x100", "nonce": 2 }
        }
    }))
    .unwrap();

    assert_eq!(params.base.gas, Some(U256::from(30000)));
    assert_eq!(params.base.block_tag, Some(BlockTag::Number(16)));
    assert_eq!(
        params.base.create_transaction,
        Some(TransactionIntent::Mode(TransactionMode::OnSuccess))
    );
    assert!(params.base.creates_transaction());
    assert!(params.base.has_overrides());
    assert_eq!(params.data.unwrap().as_str(), "0xa9059cbb");

    let overrides = params.base.state_override_set.unwrap();
    let account = &overrides[&Address::from_low_u64_be(0xaa)];
    assert_eq!(account.balance, Some(U256::from(0x100)));
    assert_eq!(account.nonce, Some(2));
}

#[test]
fn simulate_call_result_shape() {
    let success = SimulateCallResult {
        status: CallStatus::Success,
        data: Bytes::from_static(&[0x01]),
        gas_used: 21000,
        logs: vec![],
        result: Some(json!("1")),
        error: None,
    };
    assert_eq!(
        serde_json::to_value(&success).unwrap(),
        json!({
            "status": "success",
            "data": "0x01",
            "gasUsed": "0x5208",
            "logs": [],
            "result": "1"
        })
    );

    let failure = SimulateCallResult::failure("reverted");
    assert!(!failure.is_success());
    assert_eq!(
        serde_json::to_value(&failure).unwrap(),
        json!({
            "status": "failure",
            "data": "0x",
            "gasUsed": "0x0",
            "logs": [],
            "error": "reverted"
        })
    );
}

#[test]
fn asset_change_shape() {
    let change = AssetChange {
        token: TokenInfo {
            address: NATIVE_TOKEN_ADDRESS,
            symbol: "ETH".to_string(),
            decimals: 18,
        },
        value: AssetValue::new(U256::from(1000), U256::from(400)),
    };
    assert_eq!(
        serde_json::to_value(&change).unwrap(),
        json!({
            "token": {
                "address": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
                "symbol": "ETH",
                "decimals": 18
            },
            "value": { "pre": "0x3e8", "post": "0x190", "diff": "-600" }
        })
    );
}

#[test]
fn load_state_dump() {
    let params: LoadStateParams = serde_json::from_value(json!({
        "state": {
            "0x00000000000000000000000000000000000000ff": {
                "nonce": "0x1",
                "balance": "1000",
                "storageRoot": format!("0x{}", "56".repeat(32)),
                "codeHash": format!("0x{}", "c5".repeat(32)),
                "storage": { "0x00": "0x01" }
            }
        }
    }))
    .unwrap();

    let account = &params.state[&Address::from_low_u64_be(0xff)];
    assert_eq!(account.nonce, U256::one());
    assert_eq!(account.balance, U256::from(1000));
    assert_eq!(account.storage.as_ref().map(|s| s.len()), Some(1));
}
