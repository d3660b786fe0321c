use serde_json::{Map, Value};
use tracing::trace;

use super::{
    FieldRule, apply_rules,
    base_call::{BLOCK_OVERRIDE_RULES, prefixed},
    field, has_field,
    primitives::{
        validate_abi, validate_address, validate_array, validate_block_param, validate_bool,
        validate_hex, validate_integer, validate_non_empty_string, validate_quantity,
        validate_storage_map, validate_storage_root, validate_u64_quantity,
    },
    require,
};
use crate::errors::ValidationError;
use tevm_common::utils::json_type_name;

const SIMULATE_FIELDS: [&str; 6] = [
    "account",
    "calls",
    "blockNumber",
    "stateOverrides",
    "blockOverrides",
    "traceAssetChanges",
];

static SIMULATE_RULES: [FieldRule; 3] = [
    FieldRule::new("account", validate_address, ValidationError::InvalidAddress),
    FieldRule::new("blockNumber", validate_block_param, ValidationError::InvalidBlock),
    FieldRule::new("traceAssetChanges", validate_bool, ValidationError::InvalidRequest),
];

static CALL_ITEM_RULES: [FieldRule; 12] = [
    FieldRule::new("from", validate_address, ValidationError::InvalidRequest),
    FieldRule::new("to", validate_address, ValidationError::InvalidRequest),
    FieldRule::new("data", validate_hex, ValidationError::InvalidRequest),
    FieldRule::new("gas", validate_quantity, ValidationError::InvalidRequest),
    FieldRule::new("gasPrice", validate_quantity, ValidationError::InvalidRequest),
    FieldRule::new("maxFeePerGas", validate_quantity, ValidationError::InvalidRequest),
    FieldRule::new(
        "maxPriorityFeePerGas",
        validate_quantity,
        ValidationError::InvalidRequest,
    ),
    FieldRule::new("value", validate_quantity, ValidationError::InvalidRequest),
    FieldRule::new("nonce", validate_integer, ValidationError::InvalidRequest),
    FieldRule::new("abi", validate_abi, ValidationError::InvalidAbi),
    FieldRule::new(
        "functionName",
        validate_non_empty_string,
        ValidationError::InvalidRequest,
    ),
    FieldRule::new("args", validate_array, ValidationError::InvalidRequest),
];

static STATE_OVERRIDE_RULES: [FieldRule; 5] = [
    FieldRule::new("address", validate_address, ValidationError::InvalidRequest),
    FieldRule::new("balance", validate_quantity, ValidationError::InvalidRequest),
    FieldRule::new("nonce", validate_u64_quantity, ValidationError::InvalidRequest),
    FieldRule::new("code", validate_hex, ValidationError::InvalidRequest),
    FieldRule::new("storage", validate_storage_map, ValidationError::InvalidRequest),
];

/// Checks a simulate batch. Unknown top-level keys are rejected.
pub fn validate_simulate_params(params: &Value) -> Vec<ValidationError> {
    let Some(params) = params.as_object() else {
        return vec![ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        ))];
    };

    let mut errors: Vec<ValidationError> = params
        .keys()
        .filter(|key| !SIMULATE_FIELDS.contains(&key.as_str()))
        .map(|key| ValidationError::InvalidRequest(format!("Unknown field: {key}")))
        .collect();

    errors.extend(apply_rules(params, &SIMULATE_RULES));
    validate_calls(params, &mut errors);
    validate_state_overrides(params, &mut errors);

    if let Some(overrides) = field(params, "blockOverrides") {
        match overrides {
            Value::Object(overrides) => errors.extend(
                prefixed("blockOverrides", apply_rules(overrides, &BLOCK_OVERRIDE_RULES))
                    .into_iter()
                    .map(|error| ValidationError::InvalidRequest(error.message().to_owned())),
            ),
            other => errors.push(ValidationError::InvalidRequest(format!(
                "Invalid blockOverrides: expected an object, got {}",
                json_type_name(other)
            ))),
        }
    }

    if field(params, "traceAssetChanges") == Some(&Value::Bool(true))
        && !has_field(params, "account")
    {
        errors.push(ValidationError::InvalidRequest(
            "Account is required when traceAssetChanges is enabled".to_string(),
        ));
    }

    trace!(errors = errors.len(), "Validated simulate params");
    errors
}

fn validate_calls(params: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    if !require(params, "calls", ValidationError::InvalidRequest, errors) {
        return;
    }
    let Some(Value::Array(calls)) = field(params, "calls") else {
        errors.push(ValidationError::InvalidRequest(
            "Invalid calls: expected an array of calls".to_string(),
        ));
        return;
    };

    for (index, call) in calls.iter().enumerate() {
        let parent = format!("calls[{index}]");
        let Value::Object(call) = call else {
            errors.push(ValidationError::InvalidRequest(format!(
                "Invalid {parent}: expected an object, got {}",
                json_type_name(call)
            )));
            continue;
        };

        let mut call_errors = apply_rules(call, &CALL_ITEM_RULES);
        validate_access_list(call, &mut call_errors);

        let has_abi = has_field(call, "abi");
        let has_function_name = has_field(call, "functionName");
        if has_abi != has_function_name {
            call_errors.push(ValidationError::InvalidRequest(
                "Invalid abi: abi and functionName must be provided together".to_string(),
            ));
        }
        if has_abi && has_function_name && !has_field(call, "to") {
            call_errors.push(ValidationError::InvalidRequest(
                "Invalid to: a contract call needs a target address".to_string(),
            ));
        }

        errors.extend(prefixed(&parent, call_errors));
    }
}

fn validate_access_list(call: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let Some(access_list) = field(call, "accessList") else {
        return;
    };
    let Value::Array(items) = access_list else {
        errors.push(ValidationError::InvalidRequest(format!(
            "Invalid accessList: expected an array, got {}",
            json_type_name(access_list)
        )));
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let Value::Object(item) = item else {
            errors.push(ValidationError::InvalidRequest(format!(
                "Invalid accessList[{index}]: expected an object"
            )));
            continue;
        };
        match field(item, "address") {
            Some(address) => {
                if let Err(reason) = validate_address(address) {
                    errors.push(ValidationError::InvalidRequest(format!(
                        "Invalid accessList[{index}].address: {reason}"
                    )));
                }
            }
            None => errors.push(ValidationError::InvalidRequest(format!(
                "Invalid accessList[{index}].address: field is required"
            ))),
        }
        match field(item, "storageKeys") {
            Some(Value::Array(keys)) => {
                for (key_index, key) in keys.iter().enumerate() {
                    if let Err(reason) = validate_storage_root(key) {
                        errors.push(ValidationError::InvalidRequest(format!(
                            "Invalid accessList[{index}].storageKeys[{key_index}]: {reason}"
                        )));
                    }
                }
            }
            Some(other) => errors.push(ValidationError::InvalidRequest(format!(
                "Invalid accessList[{index}].storageKeys: expected an array, got {}",
                json_type_name(other)
            ))),
            None => {}
        }
    }
}

fn validate_state_overrides(params: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let Some(overrides) = field(params, "stateOverrides") else {
        return;
    };
    let Value::Array(overrides) = overrides else {
        errors.push(ValidationError::InvalidRequest(format!(
            "Invalid stateOverrides: expected an array, got {}",
            json_type_name(overrides)
        )));
        return;
    };

    for (index, state_override) in overrides.iter().enumerate() {
        let parent = format!("stateOverrides[{index}]");
        let Value::Object(state_override) = state_override else {
            errors.push(ValidationError::InvalidRequest(format!(
                "Invalid {parent}: expected an object, got {}",
                json_type_name(state_override)
            )));
            continue;
        };
        let mut override_errors = Vec::new();
        require(
            state_override,
            "address",
            ValidationError::InvalidRequest,
            &mut override_errors,
        );
        override_errors.extend(apply_rules(state_override, &STATE_OVERRIDE_RULES));
        errors.extend(prefixed(&parent, override_errors));
    }
}
