use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BaseCallParams, Hex};
use crate::abi::Abi;

/// A call described by an ABI, a function name and its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractParams {
    #[serde(flatten)]
    pub base: BaseCallParams,
    pub abi: Abi,
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Hex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_bytecode: Option<Hex>,
}

/// Same shape as [`ContractParams`]; the script's bytecode is deployed before the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptParams {
    #[serde(flatten)]
    pub base: BaseCallParams,
    pub abi: Abi,
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Hex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_bytecode: Option<Hex>,
}

impl ContractParams {
    pub fn args(&self) -> &[Value] {
        self.args.as_deref().unwrap_or_default()
    }
}

impl ScriptParams {
    pub fn args(&self) -> &[Value] {
        self.args.as_deref().unwrap_or_default()
    }
}
