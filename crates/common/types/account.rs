use std::collections::BTreeMap;

use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

use super::{BlockTag, Hex, StorageMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccountParams {
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
    pub deployed_bytecode: Option<Hex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<H256>,
    /// Replaces the whole storage. Exclusive with `state_diff`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StorageMap>,
    /// Patches individual slots. Exclusive with `state`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_diff: Option<StorageMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_fail: Option<bool>,
}

impl SetAccountParams {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountParams {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_tag: Option<BlockTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_storage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_fail: Option<bool>,
}

/// Serialized account as produced by a state dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStorage {
    #[serde(with = "crate::serde_utils::u256::quantity")]
    pub nonce: U256,
    #[serde(with = "crate::serde_utils::u256::quantity")]
    pub balance: U256,
    pub storage_root: H256,
    pub code_hash: H256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_bytecode: Option<Hex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStateParams {
    pub state: BTreeMap<Address, AccountStorage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_fail: Option<bool>,
}
