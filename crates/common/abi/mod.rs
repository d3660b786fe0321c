//! JSON ABI descriptions and the calldata codec used to turn
//! `functionName` + `args` into call data and return data back into JSON.

pub mod calldata;
pub mod param_type;

use bytes::Bytes;
use ethereum_types::H32;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

pub use calldata::{
    Value, compute_function_selector, decode_calldata, decode_tuple, encode_calldata,
    encode_tuple, parse_signature,
};
pub use param_type::ParamType;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Function {0} not found on abi")]
    FunctionNotFound(String),
    #[error("Number of arguments does not match ({expected} != {got})")]
    ArgumentCount { expected: usize, got: usize },
    #[error("Invalid argument for {ty}: {reason}")]
    InvalidArgument { ty: String, reason: String },
    #[error("Fixed bytes value is {0} bytes long")]
    FixedBytesTooLong(usize),
    #[error("Data too short, reading at {0}")]
    OutOfBounds(usize),
    #[error("Function selector does not match")]
    SelectorMismatch,
    #[error("Invalid utf8 string")]
    InvalidUtf8,
    #[error("Invalid boolean word")]
    InvalidBool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiItemKind {
    Function,
    Constructor,
    Event,
    Fallback,
    Receive,
    Error,
}

impl AbiItemKind {
    pub const ALL: [&'static str; 6] = [
        "function",
        "constructor",
        "event",
        "fallback",
        "receive",
        "error",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

impl AbiParam {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    /// Resolves `tuple`, `tuple[]`, `tuple[2][]`... through `components`.
    pub fn param_type(&self) -> Result<ParamType, AbiError> {
        let Some(dimensions) = self.kind.strip_prefix("tuple") else {
            return ParamType::parse(&self.kind);
        };

        let components = self
            .components
            .iter()
            .map(AbiParam::param_type)
            .collect::<Result<Vec<_>, _>>()?;
        let canonical = format!("{}{dimensions}", ParamType::Tuple(components));
        ParamType::parse(&canonical)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiItem {
    #[serde(rename = "type")]
    pub kind: AbiItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
}

impl AbiItem {
    pub fn function(name: &str, inputs: Vec<AbiParam>, outputs: Vec<AbiParam>) -> Self {
        Self {
            kind: AbiItemKind::Function,
            name: Some(name.to_string()),
            inputs,
            outputs,
            state_mutability: None,
            anonymous: None,
        }
    }

    pub fn input_types(&self) -> Result<Vec<ParamType>, AbiError> {
        self.inputs.iter().map(AbiParam::param_type).collect()
    }

    pub fn output_types(&self) -> Result<Vec<ParamType>, AbiError> {
        self.outputs.iter().map(AbiParam::param_type).collect()
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> Result<String, AbiError> {
        let name = self.name.as_deref().unwrap_or_default();
        let types = self
            .input_types()?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        Ok(format!("{name}({})", types.join(",")))
    }

    pub fn selector(&self) -> Result<H32, AbiError> {
        let name = self.name.as_deref().unwrap_or_default();
        let types = self
            .input_types()?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        compute_function_selector(name, &types)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abi(pub Vec<AbiItem>);

impl Abi {
    pub fn new(items: Vec<AbiItem>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[AbiItem] {
        &self.0
    }

    fn functions<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AbiItem> {
        self.0.iter().filter(move |item| {
            item.kind == AbiItemKind::Function && item.name.as_deref() == Some(name)
        })
    }

    /// Picks the overload of `name` taking `arg_count` inputs, or the first
    /// function with that name.
    pub fn function<'a>(
        &'a self,
        name: &'a str,
        arg_count: usize,
    ) -> Result<&'a AbiItem, AbiError> {
        self.functions(name)
            .find(|item| item.inputs.len() == arg_count)
            .or_else(|| self.functions(name).next())
            .ok_or_else(|| AbiError::FunctionNotFound(name.to_string()))
    }

    /// Selector followed by the ABI-encoded arguments.
    pub fn encode_function_data(&self, name: &str, args: &[Json]) -> Result<Bytes, AbiError> {
        let item = self.function(name, args.len())?;
        let types = item.input_types()?;
        if types.len() != args.len() {
            return Err(AbiError::ArgumentCount {
                expected: types.len(),
                got: args.len(),
            });
        }

        let values = types
            .iter()
            .zip(args)
            .map(|(ty, arg)| Value::from_json(ty, arg))
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = item.selector()?.as_bytes().to_vec();
        data.extend_from_slice(&encode_tuple(&values)?);
        Ok(Bytes::from(data))
    }

    /// Decodes return data of `name`. A single output is returned unwrapped,
    /// several outputs as a JSON array and no outputs as `null`.
    pub fn decode_function_result(&self, name: &str, data: &[u8]) -> Result<Json, AbiError> {
        let item = self
            .functions(name)
            .next()
            .ok_or_else(|| AbiError::FunctionNotFound(name.to_string()))?;
        let types = item.output_types()?;
        let mut values = decode_tuple(&types, data)?;

        Ok(match values.len() {
            0 => Json::Null,
            1 => values.remove(0).to_json(),
            _ => Json::Array(values.iter().map(Value::to_json).collect()),
        })
    }
}
