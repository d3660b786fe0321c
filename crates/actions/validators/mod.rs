//! Parameter validators for every action.
//!
//! Primitive validators check a single JSON value. Composite validators walk a
//! static table of [`FieldRule`]s over a params object and collect one
//! [`ValidationError`] per failing field; they never stop at the first problem.

mod account;
mod base_call;
mod call;
mod contract;
mod load_state;
mod mine;
pub mod primitives;
mod simulate;

use serde_json::{Map, Value};

use crate::errors::ValidationError;

pub use account::{validate_get_account_params, validate_set_account_params};
pub use base_call::{is_valid_base_params, validate_base_call_params, validate_base_params};
pub use call::validate_call_params;
pub use contract::{validate_contract_params, validate_script_params};
pub use load_state::validate_load_state_params;
pub use mine::validate_mine_params;
pub use simulate::validate_simulate_params;

pub type Check = fn(&Value) -> Result<(), String>;

/// How one optional field is checked and which error kind a failure becomes.
pub struct FieldRule {
    pub name: &'static str,
    pub check: Check,
    pub error: fn(String) -> ValidationError,
}

impl FieldRule {
    pub const fn new(
        name: &'static str,
        check: Check,
        error: fn(String) -> ValidationError,
    ) -> Self {
        Self { name, check, error }
    }

    fn run(&self, params: &Map<String, Value>) -> Option<ValidationError> {
        let value = field(params, self.name)?;
        (self.check)(value)
            .err()
            .map(|reason| (self.error)(format!("Invalid {}: {reason}", self.name)))
    }
}

/// Runs every rule whose field is present, in table order.
pub fn apply_rules(params: &Map<String, Value>, rules: &[FieldRule]) -> Vec<ValidationError> {
    rules.iter().filter_map(|rule| rule.run(params)).collect()
}

/// A field counts as present unless it is missing or `null`.
pub fn field<'a>(params: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|value| !value.is_null())
}

pub fn has_field(params: &Map<String, Value>, name: &str) -> bool {
    field(params, name).is_some()
}

/// Pushes `error` when `name` is missing and reports whether it was there.
pub fn require(
    params: &Map<String, Value>,
    name: &str,
    error: fn(String) -> ValidationError,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if has_field(params, name) {
        return true;
    }
    errors.push(error(format!("Invalid {name}: field is required")));
    false
}

/// Any present `createTransaction` other than `false` is truthy, `"never"` included.
pub fn transaction_requested(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null) | Some(Value::Bool(false)))
}

/// The createTransaction/override exclusion shared by call, contract and script.
pub(crate) fn check_create_transaction_overrides(
    params: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) {
    let with_overrides =
        has_field(params, "stateOverrideSet") || has_field(params, "blockOverrideSet");
    if with_overrides && transaction_requested(field(params, "createTransaction")) {
        errors.push(ValidationError::InvalidParams(
            "Cannot have stateOverrideSet or blockOverrideSet for createTransaction".to_string(),
        ));
    }
}
