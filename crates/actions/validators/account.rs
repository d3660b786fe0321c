use serde_json::Value;
use tracing::trace;

use super::{
    FieldRule, apply_rules, has_field,
    primitives::{
        validate_address, validate_block_param, validate_bool, validate_bytecode,
        validate_quantity, validate_storage_map, validate_storage_root, validate_u64_quantity,
    },
    require,
};
use crate::errors::ValidationError;
use tevm_common::utils::json_type_name;

static SET_ACCOUNT_RULES: [FieldRule; 8] = [
    FieldRule::new("address", validate_address, ValidationError::InvalidAddress),
    FieldRule::new("nonce", validate_u64_quantity, ValidationError::InvalidNonce),
    FieldRule::new("balance", validate_quantity, ValidationError::InvalidBalance),
    FieldRule::new(
        "deployedBytecode",
        validate_bytecode,
        ValidationError::InvalidDeployedBytecode,
    ),
    FieldRule::new(
        "storageRoot",
        validate_storage_root,
        ValidationError::InvalidStorageRoot,
    ),
    FieldRule::new("state", validate_storage_map, ValidationError::InvalidRequest),
    FieldRule::new("stateDiff", validate_storage_map, ValidationError::InvalidRequest),
    FieldRule::new("throwOnFail", validate_bool, ValidationError::InvalidRequest),
];

static GET_ACCOUNT_RULES: [FieldRule; 4] = [
    FieldRule::new("address", validate_address, ValidationError::InvalidAddress),
    FieldRule::new("blockTag", validate_block_param, ValidationError::InvalidBlock),
    FieldRule::new("returnStorage", validate_bool, ValidationError::InvalidRequest),
    FieldRule::new("throwOnFail", validate_bool, ValidationError::InvalidRequest),
];

pub fn validate_set_account_params(params: &Value) -> Vec<ValidationError> {
    let Some(params) = params.as_object() else {
        return vec![ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        ))];
    };

    let mut errors = Vec::new();
    require(params, "address", ValidationError::InvalidAddress, &mut errors);
    errors.extend(apply_rules(params, &SET_ACCOUNT_RULES));

    if has_field(params, "state") && has_field(params, "stateDiff") {
        errors.push(ValidationError::InvalidRequest(
            "Cannot set both state and stateDiff".to_string(),
        ));
    }

    trace!(errors = errors.len(), "Validated setAccount params");
    errors
}

pub fn validate_get_account_params(params: &Value) -> Vec<ValidationError> {
    let Some(params) = params.as_object() else {
        return vec![ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        ))];
    };

    let mut errors = Vec::new();
    require(params, "address", ValidationError::InvalidAddress, &mut errors);
    errors.extend(apply_rules(params, &GET_ACCOUNT_RULES));

    trace!(errors = errors.len(), "Validated getAccount params");
    errors
}
