use std::{fmt, str::FromStr};

use ethereum_types::H256;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
use serde_json::Value;

use crate::{
    constants::{
        BLOCK_TAG_EARLIEST, BLOCK_TAG_FINALIZED, BLOCK_TAG_LATEST, BLOCK_TAG_PENDING,
        BLOCK_TAG_SAFE,
    },
    errors::BlockTagError,
    utils::{hex_digits, is_hex, json_type_name},
};

/// Block a query or call runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
    Number(u64),
    Hash(H256),
}

impl BlockTag {
    pub fn from_json(value: &Value) -> Result<Self, BlockTagError> {
        match value {
            Value::String(tag) => tag.parse(),
            Value::Number(number) => match number.as_u64() {
                Some(number) => Ok(BlockTag::Number(number)),
                None => Err(BlockTagError::NegativeNumber),
            },
            other => Err(BlockTagError::InvalidType(json_type_name(other))),
        }
    }

    pub fn is_named(&self) -> bool {
        !matches!(self, BlockTag::Number(_) | BlockTag::Hash(_))
    }
}

impl FromStr for BlockTag {
    type Err = BlockTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            BLOCK_TAG_LATEST => Ok(BlockTag::Latest),
            BLOCK_TAG_EARLIEST => Ok(BlockTag::Earliest),
            BLOCK_TAG_PENDING => Ok(BlockTag::Pending),
            BLOCK_TAG_SAFE => Ok(BlockTag::Safe),
            BLOCK_TAG_FINALIZED => Ok(BlockTag::Finalized),
            hex if is_hex(hex) => {
                let digits = hex_digits(hex);
                if digits.len() == 64 {
                    return H256::from_str(digits)
                        .map(BlockTag::Hash)
                        .map_err(|_| BlockTagError::UnknownTag(hex.to_owned()));
                }
                if digits.is_empty() {
                    return Err(BlockTagError::UnknownTag(hex.to_owned()));
                }
                u64::from_str_radix(digits, 16)
                    .map(BlockTag::Number)
                    .map_err(|_| BlockTagError::NumberOverflow(hex.to_owned()))
            }
            unknown => Err(BlockTagError::UnknownTag(unknown.to_owned())),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str(BLOCK_TAG_LATEST),
            BlockTag::Earliest => f.write_str(BLOCK_TAG_EARLIEST),
            BlockTag::Pending => f.write_str(BLOCK_TAG_PENDING),
            BlockTag::Safe => f.write_str(BLOCK_TAG_SAFE),
            BlockTag::Finalized => f.write_str(BLOCK_TAG_FINALIZED),
            BlockTag::Number(number) => write!(f, "{number:#x}"),
            BlockTag::Hash(hash) => write!(f, "{hash:#x}"),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        BlockTag::from_json(&value).map_err(|e| D::Error::custom(e.to_string()))
    }
}
