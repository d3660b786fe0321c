use serde::Deserialize;
use tevm_common::{
    Address,
    constants::{MAX_SIMULATE_CALLS, NATIVE_TOKEN_ADDRESS},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error deserializing config from env: {err}. From config: {from:?}")]
    ConfigDeserializationError { err: envy::Error, from: String },
    #[error("{0}")]
    Custom(String),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SimulateConfig {
    /// Largest batch accepted by a single simulate request.
    #[serde(default = "default_max_calls")]
    pub max_calls: usize,
    /// Pseudo-address native balance changes are reported under.
    #[serde(default = "default_native_token")]
    pub native_token: Address,
}

fn default_max_calls() -> usize {
    MAX_SIMULATE_CALLS
}

fn default_native_token() -> Address {
    NATIVE_TOKEN_ADDRESS
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            max_calls: default_max_calls(),
            native_token: default_native_token(),
        }
    }
}

impl SimulateConfig {
    /// Reads `TEVM_SIMULATE_MAX_CALLS` and `TEVM_SIMULATE_NATIVE_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::prefixed("TEVM_SIMULATE_")
            .from_env::<Self>()
            .map_err(|e| ConfigError::ConfigDeserializationError {
                err: e,
                from: "SimulateConfig".to_string(),
            })?;
        if config.max_calls == 0 {
            return Err(ConfigError::Custom(
                "TEVM_SIMULATE_MAX_CALLS must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
