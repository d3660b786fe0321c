use serde::{Serialize, Serializer, ser::SerializeStruct};
use serde_json::Value;
use tevm_common::Address;

use crate::client::ClientError;

pub const INVALID_REQUEST_CODE: i32 = -32600;
pub const INVALID_PARAMS_CODE: i32 = -32602;

/// A single problem found while validating action params. Validators collect
/// these instead of failing on the first one.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidParams(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    InvalidAddress(String),
    #[error("{0}")]
    InvalidBlock(String),
    #[error("{0}")]
    InvalidTo(String),
    #[error("{0}")]
    InvalidCaller(String),
    #[error("{0}")]
    InvalidOrigin(String),
    #[error("{0}")]
    InvalidGasPrice(String),
    #[error("{0}")]
    InvalidGasRefund(String),
    #[error("{0}")]
    InvalidGasLimit(String),
    #[error("{0}")]
    InvalidValue(String),
    #[error("{0}")]
    InvalidMaxFeePerGas(String),
    #[error("{0}")]
    InvalidMaxPriorityFeePerGas(String),
    #[error("{0}")]
    InvalidDepth(String),
    #[error("{0}")]
    InvalidSkipBalance(String),
    #[error("{0}")]
    InvalidCreateTransaction(String),
    #[error("{0}")]
    InvalidAddToMempool(String),
    #[error("{0}")]
    InvalidAddToBlockchain(String),
    #[error("{0}")]
    InvalidBlobVersionedHashes(String),
    #[error("{0}")]
    InvalidSelfdestruct(String),
    #[error("{0}")]
    InvalidSalt(String),
    #[error("{0}")]
    InvalidData(String),
    #[error("{0}")]
    InvalidBytecode(String),
    #[error("{0}")]
    InvalidDeployedBytecode(String),
    #[error("{0}")]
    InvalidAbi(String),
    #[error("{0}")]
    InvalidArgs(String),
    #[error("{0}")]
    InvalidFunctionName(String),
    #[error("{0}")]
    InvalidNonce(String),
    #[error("{0}")]
    InvalidBalance(String),
    #[error("{0}")]
    InvalidStorageRoot(String),
}

impl ValidationError {
    /// Name of the error kind as reported to callers, e.g. `InvalidAddressError`.
    pub fn name(&self) -> &'static str {
        match self {
            ValidationError::InvalidParams(_) => "InvalidParamsError",
            ValidationError::InvalidRequest(_) => "InvalidRequestError",
            ValidationError::InvalidAddress(_) => "InvalidAddressError",
            ValidationError::InvalidBlock(_) => "InvalidBlockError",
            ValidationError::InvalidTo(_) => "InvalidToError",
            ValidationError::InvalidCaller(_) => "InvalidCallerError",
            ValidationError::InvalidOrigin(_) => "InvalidOriginError",
            ValidationError::InvalidGasPrice(_) => "InvalidGasPriceError",
            ValidationError::InvalidGasRefund(_) => "InvalidGasRefundError",
            ValidationError::InvalidGasLimit(_) => "InvalidGasLimitError",
            ValidationError::InvalidValue(_) => "InvalidValueError",
            ValidationError::InvalidMaxFeePerGas(_) => "InvalidMaxFeePerGasError",
            ValidationError::InvalidMaxPriorityFeePerGas(_) => "InvalidMaxPriorityFeePerGasError",
            ValidationError::InvalidDepth(_) => "InvalidDepthError",
            ValidationError::InvalidSkipBalance(_) => "InvalidSkipBalanceError",
            ValidationError::InvalidCreateTransaction(_) => "InvalidCreateTransactionError",
            ValidationError::InvalidAddToMempool(_) => "InvalidAddToMempoolError",
            ValidationError::InvalidAddToBlockchain(_) => "InvalidAddToBlockchainError",
            ValidationError::InvalidBlobVersionedHashes(_) => "InvalidBlobVersionedHashesError",
            ValidationError::InvalidSelfdestruct(_) => "InvalidSelfdestructError",
            ValidationError::InvalidSalt(_) => "InvalidSaltError",
            ValidationError::InvalidData(_) => "InvalidDataError",
            ValidationError::InvalidBytecode(_) => "InvalidBytecodeError",
            ValidationError::InvalidDeployedBytecode(_) => "InvalidDeployedBytecodeError",
            ValidationError::InvalidAbi(_) => "InvalidAbiError",
            ValidationError::InvalidArgs(_) => "InvalidArgsError",
            ValidationError::InvalidFunctionName(_) => "InvalidFunctionNameError",
            ValidationError::InvalidNonce(_) => "InvalidNonceError",
            ValidationError::InvalidBalance(_) => "InvalidBalanceError",
            ValidationError::InvalidStorageRoot(_) => "InvalidStorageRootError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::InvalidParams(message)
            | ValidationError::InvalidRequest(message)
            | ValidationError::InvalidAddress(message)
            | ValidationError::InvalidBlock(message)
            | ValidationError::InvalidTo(message)
            | ValidationError::InvalidCaller(message)
            | ValidationError::InvalidOrigin(message)
            | ValidationError::InvalidGasPrice(message)
            | ValidationError::InvalidGasRefund(message)
            | ValidationError::InvalidGasLimit(message)
            | ValidationError::InvalidValue(message)
            | ValidationError::InvalidMaxFeePerGas(message)
            | ValidationError::InvalidMaxPriorityFeePerGas(message)
            | ValidationError::InvalidDepth(message)
            | ValidationError::InvalidSkipBalance(message)
            | ValidationError::InvalidCreateTransaction(message)
            | ValidationError::InvalidAddToMempool(message)
            | ValidationError::InvalidAddToBlockchain(message)
            | ValidationError::InvalidBlobVersionedHashes(message)
            | ValidationError::InvalidSelfdestruct(message)
            | ValidationError::InvalidSalt(message)
            | ValidationError::InvalidData(message)
            | ValidationError::InvalidBytecode(message)
            | ValidationError::InvalidDeployedBytecode(message)
            | ValidationError::InvalidAbi(message)
            | ValidationError::InvalidArgs(message)
            | ValidationError::InvalidFunctionName(message)
            | ValidationError::InvalidNonce(message)
            | ValidationError::InvalidBalance(message)
            | ValidationError::InvalidStorageRoot(message) => message,
        }
    }

    /// JSON-RPC error code. Schema level failures map to invalid request,
    /// everything tied to a specific field to invalid params.
    pub fn code(&self) -> i32 {
        match self {
            ValidationError::InvalidRequest(_) => INVALID_REQUEST_CODE,
            _ => INVALID_PARAMS_CODE,
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("_tag", self.name())?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorMetadata {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub message: String,
}

impl From<ValidationError> for ErrorMetadata {
    fn from(value: ValidationError) -> Self {
        ErrorMetadata {
            code: value.code(),
            data: Some(value.name().to_string()),
            message: value.message().to_string(),
        }
    }
}

impl From<&TevmSimulateError> for ErrorMetadata {
    fn from(value: &TevmSimulateError) -> Self {
        ErrorMetadata {
            code: value
                .cause
                .first()
                .map(ValidationError::code)
                .unwrap_or(INVALID_PARAMS_CODE),
            data: Some("TevmSimulateError".to_string()),
            message: value.message.clone(),
        }
    }
}

/// Failure of a whole simulation request before any call ran.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct TevmSimulateError {
    pub message: String,
    /// The request as received.
    pub params: Value,
    pub cause: Vec<ValidationError>,
}

impl TevmSimulateError {
    pub fn new(message: impl Into<String>, params: Value, cause: Vec<ValidationError>) -> Self {
        Self {
            message: message.into(),
            params,
            cause,
        }
    }

    pub fn from_validation(params: &Value, cause: Vec<ValidationError>) -> Self {
        let details = cause
            .iter()
            .map(ValidationError::message)
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(
            format!("Invalid simulate params: {details}"),
            params.clone(),
            cause,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SimulateError {
    #[error(transparent)]
    Simulate(#[from] TevmSimulateError),
    #[error("Failed to apply state override for {address:#x}: {source}")]
    StateOverride {
        address: Address,
        #[source]
        source: ClientError,
    },
    #[error("Failed to fetch native balance: {0}")]
    Balance(#[source] ClientError),
}
