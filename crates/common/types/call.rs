use std::collections::{BTreeMap, BTreeSet};

use bytes::Bytes;
use ethereum_types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

use super::{BlockTag, Hex, TransactionIntent};

/// Storage slot to value mapping, both as hex strings.
pub type StorageMap = BTreeMap<Hex, Hex>;

/// Parameters shared by every call-like action (`call`, `contract`, `script`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCallParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_fail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_trace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_access_list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_transaction: Option<TransactionIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_to_mempool: Option<TransactionIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_to_blockchain: Option<TransactionIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_balance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_tag: Option<BlockTag>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_refund: Option<U256>,
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
    pub value: Option<U256>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_versioned_hashes: Option<Vec<Hex>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selfdestruct: Option<BTreeSet<Address>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_override_set: Option<BTreeMap<Address, StateOverride>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_override_set: Option<BlockOverrideSet>,
}

impl BaseCallParams {
    pub fn creates_transaction(&self) -> bool {
        self.create_transaction
            .is_some_and(|intent| intent.is_requested())
    }

    pub fn has_overrides(&self) -> bool {
        self.state_override_set.is_some() || self.block_override_set.is_some()
    }
}

/// Call-scoped patch of one account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOverride {
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
    /// Full storage replacement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StorageMap>,
    /// Partial storage patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_diff: Option<StorageMap>,
}

/// Call-scoped patch of the block context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockOverrideSet {
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<Address>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_fee: Option<U256>,
    #[serde(
        default,
        with = "crate::serde_utils::u256::quantity_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub blob_base_fee: Option<U256>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParams {
    #[serde(flatten)]
    pub base: BaseCallParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Hex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<Hex>,
    /// Creation code to deploy and run. Exclusive with `deployed_bytecode`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Hex>,
    /// Runtime code to place at `to` before the call. Exclusive with `code`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_bytecode: Option<Hex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<H256>,
    #[serde(with = "crate::serde_utils::bytes")]
    pub data: Bytes,
}

/// Outcome of executing one call on the backend. EVM failures land in `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    #[serde(with = "crate::serde_utils::bytes")]
    pub data: Bytes,
    #[serde(with = "crate::serde_utils::u64::quantity")]
    pub gas_used: u64,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
