//! Validate-then-deserialize entry point for every action's params.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tevm_common::types::{
    BaseCallParams, CallParams, ContractParams, GetAccountParams, LoadStateParams, MineParams,
    ScriptParams, SetAccountParams, SimulateParams,
};

use crate::{errors::ValidationError, validators};

pub trait ActionParams: Sized + DeserializeOwned {
    /// Every problem found in the raw params, in check order.
    fn validate(params: &Value) -> Vec<ValidationError>;

    /// Validates `params` and, when clean, deserializes them into `Self`.
    fn parse(params: &Value) -> Result<Self, Vec<ValidationError>> {
        let errors = Self::validate(params);
        if !errors.is_empty() {
            return Err(errors);
        }
        serde_json::from_value(params.clone())
            .map_err(|err| vec![ValidationError::InvalidParams(format!("Invalid params: {err}"))])
    }
}

impl ActionParams for BaseCallParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_base_call_params(params)
    }
}

impl ActionParams for CallParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_call_params(params)
    }
}

impl ActionParams for ContractParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_contract_params(params)
    }
}

impl ActionParams for ScriptParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_script_params(params)
    }
}

impl ActionParams for SetAccountParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_set_account_params(params)
    }
}

impl ActionParams for GetAccountParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_get_account_params(params)
    }
}

impl ActionParams for LoadStateParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_load_state_params(params)
    }
}

impl ActionParams for MineParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_mine_params(params)
    }
}

impl ActionParams for SimulateParams {
    fn validate(params: &Value) -> Vec<ValidationError> {
        validators::validate_simulate_params(params)
    }
}
