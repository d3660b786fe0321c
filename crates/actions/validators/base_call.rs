use serde_json::{Map, Value};
use tracing::trace;

use super::{
    FieldRule, apply_rules, field,
    primitives::{
        validate_address, validate_block_param, validate_bool, validate_hex, validate_integer,
        validate_quantity, validate_storage_map, validate_transaction_intent, validate_u64_quantity,
    },
};
use crate::errors::ValidationError;
use tevm_common::utils::json_type_name;

static BASE_CALL_RULES: [FieldRule; 19] = [
    FieldRule::new("skipBalance", validate_bool, ValidationError::InvalidSkipBalance),
    FieldRule::new("createTrace", validate_bool, ValidationError::InvalidParams),
    FieldRule::new("createAccessList", validate_bool, ValidationError::InvalidParams),
    FieldRule::new("throwOnFail", validate_bool, ValidationError::InvalidParams),
    FieldRule::new(
        "createTransaction",
        validate_transaction_intent,
        ValidationError::InvalidCreateTransaction,
    ),
    FieldRule::new(
        "addToMempool",
        validate_transaction_intent,
        ValidationError::InvalidAddToMempool,
    ),
    FieldRule::new(
        "addToBlockchain",
        validate_transaction_intent,
        ValidationError::InvalidAddToBlockchain,
    ),
    FieldRule::new("gasRefund", validate_quantity, ValidationError::InvalidGasRefund),
    FieldRule::new("gas", validate_quantity, ValidationError::InvalidGasLimit),
    FieldRule::new("value", validate_quantity, ValidationError::InvalidValue),
    FieldRule::new("gasPrice", validate_quantity, ValidationError::InvalidGasPrice),
    FieldRule::new("maxFeePerGas", validate_quantity, ValidationError::InvalidMaxFeePerGas),
    FieldRule::new(
        "maxPriorityFeePerGas",
        validate_quantity,
        ValidationError::InvalidMaxPriorityFeePerGas,
    ),
    FieldRule::new("depth", validate_integer, ValidationError::InvalidDepth),
    FieldRule::new("to", validate_address, ValidationError::InvalidTo),
    FieldRule::new("caller", validate_address, ValidationError::InvalidCaller),
    FieldRule::new("origin", validate_address, ValidationError::InvalidOrigin),
    FieldRule::new("blockTag", validate_block_param, ValidationError::InvalidBlock),
    FieldRule::new("blockOverrideSet", validate_object, ValidationError::InvalidParams),
];

static STATE_OVERRIDE_RULES: [FieldRule; 5] = [
    FieldRule::new("balance", validate_quantity, ValidationError::InvalidParams),
    FieldRule::new("nonce", validate_u64_quantity, ValidationError::InvalidParams),
    FieldRule::new("code", validate_hex, ValidationError::InvalidParams),
    FieldRule::new("state", validate_storage_map, ValidationError::InvalidParams),
    FieldRule::new("stateDiff", validate_storage_map, ValidationError::InvalidParams),
];

pub(crate) static BLOCK_OVERRIDE_RULES: [FieldRule; 6] = [
    FieldRule::new("number", validate_quantity, ValidationError::InvalidParams),
    FieldRule::new("time", validate_quantity, ValidationError::InvalidParams),
    FieldRule::new("gasLimit", validate_quantity, ValidationError::InvalidParams),
    FieldRule::new("coinbase", validate_address, ValidationError::InvalidParams),
    FieldRule::new("baseFee", validate_quantity, ValidationError::InvalidParams),
    FieldRule::new("blobBaseFee", validate_quantity, ValidationError::InvalidParams),
];

fn validate_object(value: &Value) -> Result<(), String> {
    match value {
        Value::Object(_) => Ok(()),
        other => Err(format!("expected an object, got {}", json_type_name(other))),
    }
}

/// Checks the fields shared by `call`, `contract` and `script`. Absent fields
/// are valid; everything present is checked and every failure reported.
pub fn validate_base_call_params(params: &Value) -> Vec<ValidationError> {
    let Some(params) = params.as_object() else {
        return vec![ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        ))];
    };

    let mut errors = apply_rules(params, &BASE_CALL_RULES);

    if field(params, "addToMempool").is_some() && field(params, "addToBlockchain").is_some() {
        errors.push(ValidationError::InvalidParams(
            "Cannot set both addToMempool and addToBlockchain".to_string(),
        ));
    }

    validate_blob_versioned_hashes(params, &mut errors);
    validate_selfdestruct(params, &mut errors);
    validate_state_override_set(params, &mut errors);
    if let Some(Value::Object(overrides)) = field(params, "blockOverrideSet") {
        errors.extend(prefixed(
            "blockOverrideSet",
            apply_rules(overrides, &BLOCK_OVERRIDE_RULES),
        ));
    }

    trace!(errors = errors.len(), "Validated base call params");
    errors
}

fn validate_blob_versioned_hashes(params: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let Some(hashes) = field(params, "blobVersionedHashes") else {
        return;
    };
    let Value::Array(hashes) = hashes else {
        errors.push(ValidationError::InvalidBlobVersionedHashes(format!(
            "Invalid blobVersionedHashes: expected an array, got {}",
            json_type_name(hashes)
        )));
        return;
    };
    for (index, hash) in hashes.iter().enumerate() {
        if let Err(reason) = validate_hex(hash) {
            errors.push(ValidationError::InvalidBlobVersionedHashes(format!(
                "Invalid blobVersionedHashes[{index}]: {reason}"
            )));
        }
    }
}

fn validate_selfdestruct(params: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let Some(addresses) = field(params, "selfdestruct") else {
        return;
    };
    let Value::Array(addresses) = addresses else {
        errors.push(ValidationError::InvalidSelfdestruct(format!(
            "Invalid selfdestruct: expected a set of addresses, got {}",
            json_type_name(addresses)
        )));
        return;
    };
    for (index, address) in addresses.iter().enumerate() {
        if let Err(reason) = validate_address(address) {
            errors.push(ValidationError::InvalidSelfdestruct(format!(
                "Invalid selfdestruct[{index}]: {reason}"
            )));
        }
    }
}

fn validate_state_override_set(params: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let Some(overrides) = field(params, "stateOverrideSet") else {
        return;
    };
    let Value::Object(overrides) = overrides else {
        errors.push(ValidationError::InvalidParams(format!(
            "Invalid stateOverrideSet: expected an object, got {}",
            json_type_name(overrides)
        )));
        return;
    };

    for (address, account) in overrides {
        if let Err(reason) = validate_address(&Value::String(address.clone())) {
            errors.push(ValidationError::InvalidParams(format!(
                "Invalid stateOverrideSet key {address}: {reason}"
            )));
            continue;
        }
        let Value::Object(account) = account else {
            errors.push(ValidationError::InvalidParams(format!(
                "Invalid stateOverrideSet.{address}: expected an object, got {}",
                json_type_name(account)
            )));
            continue;
        };
        errors.extend(prefixed(
            &format!("stateOverrideSet.{address}"),
            apply_rules(account, &STATE_OVERRIDE_RULES),
        ));
    }
}

/// Rewrites `Invalid field: ...` messages of nested rules to `Invalid parent.field: ...`.
pub(crate) fn prefixed(parent: &str, errors: Vec<ValidationError>) -> Vec<ValidationError> {
    errors
        .into_iter()
        .map(|error| {
            let message = match error.message().strip_prefix("Invalid ") {
                Some(rest) => format!("Invalid {parent}.{rest}"),
                None => format!("{parent}: {}", error.message()),
            };
            with_message(&error, message)
        })
        .collect()
}

fn with_message(error: &ValidationError, message: String) -> ValidationError {
    match error {
        ValidationError::InvalidRequest(_) => ValidationError::InvalidRequest(message),
        ValidationError::InvalidAbi(_) => ValidationError::InvalidAbi(message),
        ValidationError::InvalidAddress(_) => ValidationError::InvalidAddress(message),
        ValidationError::InvalidNonce(_) => ValidationError::InvalidNonce(message),
        ValidationError::InvalidBalance(_) => ValidationError::InvalidBalance(message),
        ValidationError::InvalidStorageRoot(_) => ValidationError::InvalidStorageRoot(message),
        _ => ValidationError::InvalidParams(message),
    }
}

/// The `{ throwOnFail }` shape every action accepts.
///
/// Unlike the other validators this one fails instead of returning a list.
pub fn validate_base_params(params: &Value) -> Result<(), ValidationError> {
    let Some(params) = params.as_object() else {
        return Err(ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        )));
    };
    if let Some(throw_on_fail) = field(params, "throwOnFail") {
        validate_bool(throw_on_fail).map_err(|reason| {
            ValidationError::InvalidParams(format!("Invalid throwOnFail: {reason}"))
        })?;
    }
    Ok(())
}

/// `Ok(true)` for valid base params, the first problem otherwise.
pub fn is_valid_base_params(params: &Value) -> Result<bool, ValidationError> {
    validate_base_params(params).map(|()| true)
}
