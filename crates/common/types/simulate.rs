use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BlockOverrideSet, BlockTag, Hex, Log, StorageMap};
use crate::abi::Abi;

/// A batch of calls run one after the other against the same state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimulateParams {
    /// Account whose native balance is tracked when `trace_asset_changes` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Address>,
    pub calls: Vec<SimulateCallItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<BlockTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_overrides: Option<Vec<SimulateStateOverride>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_overrides: Option<BlockOverrideSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_asset_changes: Option<bool>,
}

impl SimulateParams {
    pub fn traces_asset_changes(&self) -> bool {
        self.trace_asset_changes.unwrap_or(false)
    }

    pub fn block_tag(&self) -> BlockTag {
        self.block_number.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateCallItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Hex>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_price: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_fee_per_gas: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u64::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_list: Option<Vec<AccessListItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<Abi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
    pub address: Address,
    #[serde(default)]
    pub storage_keys: Vec<H256>,
}

/// Account patch applied before the batch runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateStateOverride {
    pub address: Address,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u64::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Hex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateCallResult {
    pub status: CallStatus,
    #[serde(with = "crate::serde_utils::bytes")]
    pub data: Bytes,
    #[serde(with = "crate::serde_utils::u64::quantity")]
    pub gas_used: u64,
    pub logs: Vec<Log>,
    /// Decoded return value, present only when the call carried an ABI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulateCallResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: CallStatus::Failure,
            data: Bytes::new(),
            gas_used: 0,
            logs: Vec::new(),
            result: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetValue {
    #[serde(with = "crate::serde_utils::u256::quantity")]
    pub pre: U256,
    #[serde(with = "crate::serde_utils::u256::quantity")]
    pub post: U256,
    /// `post - pre`, negative when the balance went down.
    #[serde(with = "crate::serde_utils::bigint")]
    pub diff: BigInt,
}

impl AssetValue {
    pub fn new(pre: U256, post: U256) -> Self {
        let diff = BigInt::from_bytes_be(num_bigint::Sign::Plus, &post.to_big_endian())
            - BigInt::from_bytes_be(num_bigint::Sign::Plus, &pre.to_big_endian());
        Self { pre, post, diff }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetChange {
    pub token: TokenInfo,
    pub value: AssetValue,
}
