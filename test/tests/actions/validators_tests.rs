use serde_json::{Value, json};
use tevm_actions::{
    ErrorMetadata, ValidationError,
    validators::{
        is_valid_base_params, primitives::validate_address, validate_base_call_params,
        validate_base_params, validate_call_params, validate_contract_params,
        validate_get_account_params, validate_load_state_params, validate_mine_params,
        validate_script_params, validate_set_account_params, validate_simulate_params,
    },
};

type Validator = fn(&Value) -> Vec<ValidationError>;

const VALIDATORS: [(&str, Validator); 9] = [
    ("base", validate_base_call_params),
    ("call", validate_call_params),
    ("contract", validate_contract_params),
    ("script", validate_script_params),
    ("setAccount", validate_set_account_params),
    ("getAccount", validate_get_account_params),
    ("loadState", validate_load_state_params),
    ("mine", validate_mine_params),
    ("simulate", validate_simulate_params),
];

const ADDRESS: &str = "0x00000000000000000000000000000000000000ff";

fn erc20_abi() -> Value {
    json!([{
        "type": "function",
        "name": "balanceOf",
        "inputs": [{ "name": "owner", "type": "address" }],
        "outputs": [{ "name": "", "type": "uint256" }],
        "stateMutability": "view"
    }])
}

fn names(errors: &[ValidationError]) -> Vec<&'static str> {
    errors.iter().map(ValidationError::name).collect()
}

#[test]
fn validators_are_total() {
    let inputs = [
        json!(null),
        json!(0),
        json!("0x"),
        json!([]),
        json!([{}]),
        json!({ "to": { "nested": [1, 2, { "deeper": null }] } }),
        json!({ "stateOverrideSet": [1], "blockOverrideSet": "x", "calls": 7 }),
        json!({ "state": { "0x00": [] }, "selfdestruct": {}, "blobVersionedHashes": 1 }),
    ];
    for (name, validate) in VALIDATORS {
        for input in &inputs {
            let errors = validate(input);
            if !input.is_object() {
                assert_eq!(errors.len(), 1, "{name} on {input}");
                assert_eq!(errors[0].name(), "InvalidParamsError");
            }
        }
    }
}

#[test]
fn documented_shapes_are_valid() {
    let storage_root = format!("0x{}", "00".repeat(32));
    let cases = [
        (
            validate_base_call_params as Validator,
            json!({
                "throwOnFail": false,
                "createTrace": true,
                "createAccessList": true,
                "createTransaction": "never",
                "addToMempool": "on-success",
                "skipBalance": true,
                "gasRefund": "0x0",
                "blockTag": "latest",
                "gas": 1_000_000,
                "value": "1000",
                "gasPrice": "0x1",
                "maxFeePerGas": "0x2",
                "maxPriorityFeePerGas": "0x1",
                "depth": 0,
                "to": ADDRESS,
                "caller": ADDRESS,
                "origin": ADDRESS,
                "blobVersionedHashes": [format!("0x01{}", "00".repeat(31))],
                "selfdestruct": [ADDRESS],
                "stateOverrideSet": { ADDRESS: { "balance": "0x1", "stateDiff": { "0x00": "0x01" } } },
                "blockOverrideSet": { "number": 10, "time": "0x10", "coinbase": ADDRESS }
            }),
        ),
        (
            validate_call_params,
            json!({ "to": ADDRESS, "data": "0x70a08231", "salt": "0x00", "code": "0x6080" }),
        ),
        (
            validate_contract_params,
            json!({ "to": ADDRESS, "abi": erc20_abi(), "functionName": "balanceOf", "args": [ADDRESS] }),
        ),
        (
            validate_script_params,
            json!({
                "abi": erc20_abi(),
                "functionName": "balanceOf",
                "args": [ADDRESS],
                "deployedBytecode": "0x6080"
            }),
        ),
        (
            validate_set_account_params,
            json!({
                "address": ADDRESS,
                "nonce": "0x1",
                "balance": 100,
                "deployedBytecode": "0x6080",
                "storageRoot": storage_root,
                "state": { "0x00": "0x01" }
            }),
        ),
        (
            validate_get_account_params,
            json!({ "address": ADDRESS, "blockTag": 12, "returnStorage": true }),
        ),
        (validate_mine_params, json!({ "blockCount": 2, "interval": 12 })),
    ];

    for (validate, params) in cases {
        let errors = validate(&params);
        assert!(errors.is_empty(), "{params}: {errors:?}");
    }
}

#[test]
fn address_shape() {
    let valid = format!("0x{}", "aB".repeat(20));
    assert!(validate_address(&json!(valid)).is_ok());
    for invalid in [
        json!(format!("0x{}", "ab".repeat(19))),
        json!(format!("0x{}", "ab".repeat(21))),
        json!(format!("0x{}g", "a".repeat(39))),
        json!(format!("1x{}", "a".repeat(40))),
        json!(42),
    ] {
        assert!(validate_address(&invalid).is_err(), "{invalid}");
    }
}

#[test]
fn code_and_deployed_bytecode_exclusion() {
    let errors = validate_call_params(&json!({ "code": "0x1234", "deployedBytecode": "0x5678" }));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message().contains("code and deployedBytecode"));
}

#[test]
fn create_transaction_with_overrides() {
    let params = json!({ "createTransaction": true, "stateOverrideSet": {} });
    for validate in [validate_call_params, validate_contract_params, validate_script_params] {
        assert!(
            validate(&params)
                .iter()
                .any(|error| error.message().contains("createTransaction"))
        );
        assert!(
            !validate(&json!({ "createTransaction": true }))
                .iter()
                .any(|error| error.message().contains("createTransaction"))
        );
    }
}

#[test]
fn negative_quantities_map_to_their_field() {
    let fields = [
        ("gas", "InvalidGasLimitError"),
        ("value", "InvalidValueError"),
        ("gasPrice", "InvalidGasPriceError"),
        ("gasRefund", "InvalidGasRefundError"),
        ("maxFeePerGas", "InvalidMaxFeePerGasError"),
        ("maxPriorityFeePerGas", "InvalidMaxPriorityFeePerGasError"),
    ];
    for (field, expected) in fields {
        let errors = validate_base_call_params(&json!({ field: -1 }));
        assert_eq!(names(&errors), vec![expected], "{field}");

        let errors = validate_base_call_params(&json!({ field: "-0x10" }));
        assert_eq!(names(&errors), vec![expected], "{field}");

        assert!(validate_base_call_params(&json!({ field: 1 })).is_empty());
        assert!(validate_base_call_params(&json!({ field: "0xff" })).is_empty());
    }
}

#[test]
fn errors_accumulate() {
    let errors = validate_base_call_params(&json!({ "skipBalance": "x", "depth": -1, "to": 123 }));
    assert_eq!(
        names(&errors),
        vec!["InvalidSkipBalanceError", "InvalidDepthError", "InvalidToError"]
    );
}

#[test]
fn base_params_pair_throws() {
    assert!(validate_base_params(&json!({ "throwOnFail": true })).is_ok());
    assert_eq!(is_valid_base_params(&json!({})), Ok(true));

    let error = validate_base_params(&json!({ "throwOnFail": "yes" })).unwrap_err();
    assert_eq!(error.name(), "InvalidParamsError");
    assert!(is_valid_base_params(&json!(1)).is_err());
}

#[test]
fn load_state_reports_each_account() {
    let errors = validate_load_state_params(&json!({
        "state": {
            "0x00000000000000000000000000000000000000aa": { "nonce": "0x1" },
            "0x00000000000000000000000000000000000000bb": "not an account"
        }
    }));
    assert_eq!(
        names(&errors),
        vec![
            "InvalidBalanceError",
            "InvalidStorageRootError",
            "InvalidRequestError",
            "InvalidRequestError"
        ]
    );
    assert!(errors[3].message().contains("0x00000000000000000000000000000000000000bb"));
}

#[test]
fn error_metadata_shape() {
    let metadata = ErrorMetadata::from(ValidationError::InvalidGasPrice(
        "Invalid gasPrice: negative".to_string(),
    ));
    assert_eq!(
        serde_json::to_value(&metadata).unwrap(),
        json!({ "code": -32602, "data": "InvalidGasPriceError", "message": "Invalid gasPrice: negative" })
    );

    let error = ValidationError::InvalidRequest("Unknown field: foo".to_string());
    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({ "_tag": "InvalidRequestError", "code": -32600, "message": "Unknown field: foo" })
    );
}
