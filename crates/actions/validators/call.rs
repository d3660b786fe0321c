use serde_json::Value;
use tracing::trace;

use super::{
    FieldRule, apply_rules, check_create_transaction_overrides, has_field,
    primitives::{validate_bytecode, validate_hex},
    validate_base_call_params,
};
use crate::errors::ValidationError;

static CALL_RULES: [FieldRule; 4] = [
    FieldRule::new("data", validate_hex, ValidationError::InvalidData),
    FieldRule::new("salt", validate_hex, ValidationError::InvalidSalt),
    FieldRule::new("code", validate_bytecode, ValidationError::InvalidBytecode),
    FieldRule::new(
        "deployedBytecode",
        validate_bytecode,
        ValidationError::InvalidDeployedBytecode,
    ),
];

pub fn validate_call_params(params: &Value) -> Vec<ValidationError> {
    let mut errors = validate_base_call_params(params);
    let Some(params) = params.as_object() else {
        return errors;
    };

    errors.extend(apply_rules(params, &CALL_RULES));

    if has_field(params, "code") && has_field(params, "deployedBytecode") {
        errors.push(ValidationError::InvalidParams(
            "Cannot have both code and deployedBytecode set".to_string(),
        ));
    }
    check_create_transaction_overrides(params, &mut errors);

    trace!(errors = errors.len(), "Validated call params");
    errors
}
