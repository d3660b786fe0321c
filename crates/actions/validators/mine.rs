use serde_json::Value;

use super::{
    FieldRule, apply_rules,
    primitives::{validate_bool, validate_integer},
};
use crate::errors::ValidationError;
use tevm_common::utils::json_type_name;

static MINE_RULES: [FieldRule; 3] = [
    FieldRule::new("blockCount", validate_integer, ValidationError::InvalidRequest),
    FieldRule::new("interval", validate_integer, ValidationError::InvalidRequest),
    FieldRule::new("throwOnFail", validate_bool, ValidationError::InvalidRequest),
];

pub fn validate_mine_params(params: &Value) -> Vec<ValidationError> {
    match params.as_object() {
        Some(params) => apply_rules(params, &MINE_RULES),
        None => vec![ValidationError::InvalidParams(format!(
            "Invalid params: expected an object, got {}",
            json_type_name(params)
        ))],
    }
}
