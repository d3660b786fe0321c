use num_traits::Zero;
use serde::Serialize;
use serde_json::Value;
use tevm_common::{
    Address, U256,
    constants::{NATIVE_TOKEN_DECIMALS, NATIVE_TOKEN_SYMBOL},
    types::{
        AssetChange, AssetValue, BaseCallParams, BlockTag, CallParams, CallStatus, Hex,
        SetAccountParams, SimulateCallItem, SimulateCallResult, SimulateParams,
        SimulateStateOverride, TokenInfo,
    },
};
use tracing::{debug, trace, warn};

use crate::{
    client::TevmClient,
    config::SimulateConfig,
    errors::{SimulateError, TevmSimulateError, ValidationError},
    events::CallEvents,
    params::ActionParams,
};

/// Outcome of a simulation. `error` is only set when the request was rejected
/// and `throw_on_fail` was off; `results` is empty in that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResult {
    pub results: Vec<SimulateCallResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_changes: Option<Vec<AssetChange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TevmSimulateError>,
}

impl SimulateResult {
    fn rejected(error: TevmSimulateError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Runs a batch of calls one after the other against a [`TevmClient`] and
/// optionally reports how the account's native balance moved.
pub struct SimulateHandler<C: TevmClient> {
    client: C,
    config: SimulateConfig,
    events: CallEvents,
}

impl<C: TevmClient> SimulateHandler<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: SimulateConfig::default(),
            events: CallEvents::default(),
        }
    }

    pub fn with_config(mut self, config: SimulateConfig) -> Self {
        self.config = config;
        self
    }

    /// Handlers forwarded to every call of the batch.
    pub fn with_events(mut self, events: CallEvents) -> Self {
        self.events = events;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn handle(
        &self,
        params: &Value,
        throw_on_fail: bool,
    ) -> Result<SimulateResult, SimulateError> {
        // 1. Validate and parse the request.
        let request = match SimulateParams::parse(params) {
            Ok(request) => request,
            Err(errors) => {
                return reject(TevmSimulateError::from_validation(params, errors), throw_on_fail);
            }
        };

        // 2. Asset tracing needs an account to trace.
        let account = match (request.traces_asset_changes(), request.account) {
            (true, None) => {
                let cause = ValidationError::InvalidRequest(
                    "Account is required when traceAssetChanges is enabled".to_string(),
                );
                return reject(
                    TevmSimulateError::new(cause.message().to_string(), params.clone(), vec![cause]),
                    throw_on_fail,
                );
            }
            (true, Some(account)) => Some(account),
            (false, _) => None,
        };

        // 3. Batch size.
        if request.calls.len() > self.config.max_calls {
            let cause = ValidationError::InvalidRequest(format!(
                "Too many calls: {} (max {})",
                request.calls.len(),
                self.config.max_calls
            ));
            return reject(
                TevmSimulateError::new(cause.message().to_string(), params.clone(), vec![cause]),
                throw_on_fail,
            );
        }

        let block = request.block_tag();
        debug!(
            calls = request.calls.len(),
            %block,
            trace_asset_changes = account.is_some(),
            "Simulating call batch"
        );

        // 4. State overrides, in order.
        for state_override in request.state_overrides.iter().flatten() {
            self.apply_state_override(state_override).await?;
        }

        // 5. Block overrides are accepted but not applied.
        if request.block_overrides.is_some() {
            warn!("Block overrides are not supported by simulate, ignoring them");
        }

        // 6. Baseline native balance.
        let pre_balance = match account {
            Some(account) => Some(self.native_balance(account, &block).await?),
            None => None,
        };

        // 7. Calls, in order. A failing call never stops the batch.
        let mut results = Vec::with_capacity(request.calls.len());
        for (index, call) in request.calls.iter().enumerate() {
            let result = self.run_call(call, &block).await;
            if let Some(error) = &result.error {
                warn!(index, %error, "Simulated call failed");
            } else {
                trace!(index, gas_used = result.gas_used, "Simulated call succeeded");
            }
            results.push(result);
        }

        // 8. Native balance movement.
        let asset_changes = match (account, pre_balance) {
            (Some(account), Some(pre)) => {
                let post = self.native_balance(account, &block).await?;
                Some(self.native_asset_changes(pre, post))
            }
            _ => None,
        };

        debug!(
            calls = results.len(),
            failed = results.iter().filter(|result| !result.is_success()).count(),
            "Simulation finished"
        );

        Ok(SimulateResult {
            results,
            asset_changes,
            error: None,
        })
    }

    async fn apply_state_override(
        &self,
        state_override: &SimulateStateOverride,
    ) -> Result<(), SimulateError> {
        let params = SetAccountParams {
            balance: state_override.balance,
            nonce: state_override.nonce,
            deployed_bytecode: state_override.code.clone(),
            state_diff: state_override.storage.clone(),
            ..SetAccountParams::new(state_override.address)
        };
        trace!(address = ?state_override.address, "Applying state override");

        self.client
            .set_account(params)
            .await
            .map_err(|source| SimulateError::StateOverride {
                address: state_override.address,
                source,
            })
    }

    async fn native_balance(&self, account: Address, block: &BlockTag) -> Result<U256, SimulateError> {
        self.client
            .get_balance(account, block)
            .await
            .map_err(SimulateError::Balance)
    }

    fn native_asset_changes(&self, pre: U256, post: U256) -> Vec<AssetChange> {
        let value = AssetValue::new(pre, post);
        if value.diff.is_zero() {
            return Vec::new();
        }
        vec![AssetChange {
            token: TokenInfo {
                address: self.config.native_token,
                symbol: NATIVE_TOKEN_SYMBOL.to_string(),
                decimals: NATIVE_TOKEN_DECIMALS,
            },
            value,
        }]
    }

    async fn run_call(&self, call: &SimulateCallItem, block: &BlockTag) -> SimulateCallResult {
        let data = match call_data(call) {
            Ok(data) => data,
            Err(error) => return SimulateCallResult::failure(error),
        };

        let params = CallParams {
            base: BaseCallParams {
                caller: call.from,
                to: call.to,
                gas: call.gas,
                gas_price: call.gas_price,
                max_fee_per_gas: call.max_fee_per_gas,
                max_priority_fee_per_gas: call.max_priority_fee_per_gas,
                value: call.value,
                block_tag: Some(*block),
                create_trace: Some(true),
                throw_on_fail: Some(false),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        };

        let outcome = match self.client.call(params, &self.events).await {
            Ok(outcome) => outcome,
            Err(error) => return SimulateCallResult::failure(error.to_string()),
        };
        if let Some(error) = outcome.error {
            return SimulateCallResult {
                status: CallStatus::Failure,
                data: outcome.data,
                gas_used: outcome.gas_used,
                logs: outcome.logs,
                result: None,
                error: Some(error),
            };
        }

        let result = match (&call.abi, &call.function_name) {
            (Some(abi), Some(function_name)) => {
                match abi.decode_function_result(function_name, &outcome.data) {
                    Ok(decoded) => Some(decoded),
                    Err(error) => {
                        trace!(%error, %function_name, "Could not decode call result");
                        None
                    }
                }
            }
            _ => None,
        };

        SimulateCallResult {
            status: CallStatus::Success,
            data: outcome.data,
            gas_used: outcome.gas_used,
            logs: outcome.logs,
            result,
            error: None,
        }
    }
}

/// Literal `data`, or the ABI encoding of `functionName(args)` when an ABI is given.
fn call_data(call: &SimulateCallItem) -> Result<Hex, String> {
    match (&call.abi, &call.function_name) {
        (Some(abi), Some(function_name)) => {
            let args = call.args.as_deref().unwrap_or_default();
            abi.encode_function_data(function_name, args)
                .map(|data| Hex::from_bytes(&data))
                .map_err(|error| format!("Failed to encode {function_name}: {error}"))
        }
        _ => Ok(call.data.clone().unwrap_or_else(Hex::empty)),
    }
}

fn reject(error: TevmSimulateError, throw_on_fail: bool) -> Result<SimulateResult, SimulateError> {
    warn!(%error, "Rejected simulate request");
    if throw_on_fail {
        return Err(error.into());
    }
    Ok(SimulateResult::rejected(error))
}
