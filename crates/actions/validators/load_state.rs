use serde_json::{Map, Value};
use tracing::trace;

use super::{
    FieldRule, apply_rules, base_call::prefixed, field,
    primitives::{
        validate_address, validate_bool, validate_hex, validate_quantity, validate_storage_map,
        validate_storage_root,
    },
    require,
};
use crate::errors::ValidationError;
use tevm_common::utils::json_type_name;

static ACCOUNT_STORAGE_RULES: [FieldRule; 6] = [
    FieldRule::new("nonce", validate_quantity, ValidationError::InvalidNonce),
    FieldRule::new("balance", validate_quantity, ValidationError::InvalidBalance),
    FieldRule::new(
        "storageRoot",
        validate_storage_root,
        ValidationError::InvalidStorageRoot,
    ),
    FieldRule::new("codeHash", validate_storage_root, ValidationError::InvalidRequest),
    FieldRule::new("storage", validate_storage_map, ValidationError::InvalidRequest),
    FieldRule::new("deployedBytecode", validate_hex, ValidationError::InvalidRequest),
];

/// A state dump: `{ state: { <address>: AccountStorage } }`.
pub fn validate_load_state_params(params: &Value) -> Vec<ValidationError> {
    let Some(params) = params.as_object() else {
        return vec![ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        ))];
    };

    let mut errors = Vec::new();
    if let Some(throw_on_fail) = field(params, "throwOnFail") {
        if let Err(reason) = validate_bool(throw_on_fail) {
            errors.push(ValidationError::InvalidRequest(format!(
                "Invalid throwOnFail: {reason}"
            )));
        }
    }

    if !require(params, "state", ValidationError::InvalidRequest, &mut errors) {
        return errors;
    }
    let Some(Value::Object(state)) = field(params, "state") else {
        errors.push(ValidationError::InvalidRequest(
            "Invalid state: expected an object of accounts".to_string(),
        ));
        return errors;
    };

    for (address, account) in state {
        if let Err(reason) = validate_address(&Value::String(address.clone())) {
            errors.push(ValidationError::InvalidAddress(format!(
                "Invalid state key {address}: {reason}"
            )));
            continue;
        }
        let Value::Object(account) = account else {
            errors.push(ValidationError::InvalidRequest(format!(
                "Invalid state.{address}: expected an object, got {}",
                json_type_name(account)
            )));
            continue;
        };
        validate_account_storage(address, account, &mut errors);
    }

    trace!(errors = errors.len(), "Validated loadState params");
    errors
}

fn validate_account_storage(
    address: &str,
    account: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) {
    let mut account_errors = Vec::new();
    require(account, "nonce", ValidationError::InvalidNonce, &mut account_errors);
    require(account, "balance", ValidationError::InvalidBalance, &mut account_errors);
    require(
        account,
        "storageRoot",
        ValidationError::InvalidStorageRoot,
        &mut account_errors,
    );
    require(
        account,
        "codeHash",
        ValidationError::InvalidRequest,
        &mut account_errors,
    );
    account_errors.extend(apply_rules(account, &ACCOUNT_STORAGE_RULES));

    errors.extend(prefixed(&format!("state.{address}"), account_errors));
}
