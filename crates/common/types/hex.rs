use std::{fmt, str::FromStr};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    errors::HexError,
    utils::{decode_hex, encode_hex, hex_digits, is_hex},
};

/// A `0x` prefixed hex string of any length. Bytecode, calldata, salts and storage
/// slots travel as `Hex` until they are handed to the execution backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hex(String);

impl Hex {
    pub fn empty() -> Self {
        Self("0x".to_owned())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(encode_hex(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digits after the prefix.
    pub fn digits(&self) -> &str {
        hex_digits(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.digits().is_empty()
    }

    /// Decodes into bytes, left-padding odd-length strings with a zero nibble.
    pub fn to_bytes(&self) -> Result<Bytes, HexError> {
        Ok(Bytes::from(decode_hex(&self.0)?))
    }
}

impl TryFrom<String> for Hex {
    type Error = HexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !is_hex(&value) {
            return Err(HexError::NotHex(value));
        }
        Ok(Self(value))
    }
}

impl FromStr for Hex {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<Hex> for String {
    fn from(value: Hex) -> Self {
        value.0
    }
}

impl From<Bytes> for Hex {
    fn from(value: Bytes) -> Self {
        Self::from_bytes(&value)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
