use serde::{Deserialize, Deserializer, Serializer, de::Error};
use serde_json::Value;

/// Quantities accepted on the wire: a non-negative JSON integer, a 0x-prefixed hex
/// string or a decimal string.
pub mod u256 {
    use super::*;
    use crate::utils::u256_from_json;
    use ethereum_types::U256;

    pub mod quantity {
        use super::*;

        pub fn deserialize<'de, D>(d: D) -> Result<U256, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Value::deserialize(d)?;
            u256_from_json(&value).map_err(|e| D::Error::custom(e.to_string()))
        }

        pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&format!("{value:#x}"))
        }
    }

    pub mod quantity_opt {
        use super::*;
        use serde::Serialize;

        pub fn deserialize<'de, D>(d: D) -> Result<Option<U256>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<Value>::deserialize(d)? {
                None | Some(Value::Null) => Ok(None),
                Some(value) => u256_from_json(&value)
                    .map(Some)
                    .map_err(|e| D::Error::custom(e.to_string())),
            }
        }

        pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Option::<String>::serialize(&value.map(|v| format!("{v:#x}")), serializer)
        }
    }

    pub mod dec_str {
        use super::*;

        pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&value.to_string())
        }
    }
}

pub mod u64 {
    use super::*;
    use crate::utils::u64_from_json;

    pub mod quantity {
        use super::*;

        pub fn deserialize<'de, D>(d: D) -> Result<u64, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Value::deserialize(d)?;
            u64_from_json(&value).map_err(|e| D::Error::custom(e.to_string()))
        }

        pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&format!("{value:#x}"))
        }
    }

    pub mod quantity_opt {
        use super::*;
        use serde::Serialize;

        pub fn deserialize<'de, D>(d: D) -> Result<Option<u64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<Value>::deserialize(d)? {
                None | Some(Value::Null) => Ok(None),
                Some(value) => u64_from_json(&value)
                    .map(Some)
                    .map_err(|e| D::Error::custom(e.to_string())),
            }
        }

        pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Option::<String>::serialize(&value.map(|v| format!("{v:#x}")), serializer)
        }
    }
}

/// Serializes to and deserializes from 0x prefixed hex string
pub mod bytes {
    use ::bytes::Bytes;

    use super::*;
    use crate::utils::{decode_hex, encode_hex};

    pub fn deserialize<'de, D>(d: D) -> Result<Bytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(d)?;
        let bytes = decode_hex(&value).map_err(|e| D::Error::custom(e.to_string()))?;
        Ok(Bytes::from(bytes))
    }

    pub fn serialize<S>(value: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_hex(value))
    }
}

/// Signed integers rendered as decimal strings, e.g. `"-1000"`.
pub mod bigint {
    use super::*;
    use num_bigint::BigInt;

    pub fn serialize<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(d)?;
        BigInt::parse_bytes(value.as_bytes(), 10)
            .ok_or_else(|| D::Error::custom(format!("Failed to parse '{value}' as an integer")))
    }
}
