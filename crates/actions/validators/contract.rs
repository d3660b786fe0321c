use serde_json::{Map, Value};
use tracing::trace;

use super::{
    FieldRule, apply_rules, check_create_transaction_overrides, require,
    primitives::{validate_abi, validate_array, validate_bytecode, validate_non_empty_string},
    validate_base_call_params,
};
use crate::errors::ValidationError;

static CONTRACT_RULES: [FieldRule; 5] = [
    FieldRule::new("abi", validate_abi, ValidationError::InvalidAbi),
    FieldRule::new(
        "functionName",
        validate_non_empty_string,
        ValidationError::InvalidFunctionName,
    ),
    FieldRule::new("args", validate_array, ValidationError::InvalidArgs),
    FieldRule::new("code", validate_bytecode, ValidationError::InvalidBytecode),
    FieldRule::new(
        "deployedBytecode",
        validate_bytecode,
        ValidationError::InvalidDeployedBytecode,
    ),
];

/// Base call checks plus the ABI description of the function to call.
pub fn validate_contract_params(params: &Value) -> Vec<ValidationError> {
    let errors = validate_abi_call(params);
    trace!(errors = errors.len(), "Validated contract params");
    errors
}

/// Same shape as contract params.
pub fn validate_script_params(params: &Value) -> Vec<ValidationError> {
    let errors = validate_abi_call(params);
    trace!(errors = errors.len(), "Validated script params");
    errors
}

fn validate_abi_call(params: &Value) -> Vec<ValidationError> {
    let mut errors = validate_base_call_params(params);
    let Some(params) = params.as_object() else {
        return errors;
    };

    check_required(params, &mut errors);
    errors.extend(apply_rules(params, &CONTRACT_RULES));
    check_create_transaction_overrides(params, &mut errors);

    errors
}

fn check_required(params: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    require(params, "abi", ValidationError::InvalidAbi, errors);
    require(
        params,
        "functionName",
        ValidationError::InvalidFunctionName,
        errors,
    );
}
