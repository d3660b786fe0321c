use std::sync::LazyLock;

use ethereum_types::U256;
use hex::FromHexError;
use regex::Regex;
use serde_json::Value;

use crate::errors::QuantityError;

static HEX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]*$").expect("hex regex is valid"));

/// Returns true for `0x` followed by any number of hex digits, `0x` alone included.
pub fn is_hex(value: &str) -> bool {
    HEX_REGEX.is_match(value)
}

/// Strips the `0x` prefix, if any.
pub fn hex_digits(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

pub fn decode_hex(hex: &str) -> Result<Vec<u8>, FromHexError> {
    let trimmed = hex_digits(hex);
    if trimmed.len() % 2 == 1 {
        return hex::decode(format!("0{trimmed}"));
    }
    hex::decode(trimmed)
}

pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Name of the JSON type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads a non-negative integer out of a JSON number or a hex/decimal string.
pub fn u256_from_json(value: &Value) -> Result<U256, QuantityError> {
    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                return Ok(U256::from(unsigned));
            }
            if number.as_i64().is_some() {
                return Err(QuantityError::Negative);
            }
            match number.as_f64() {
                Some(float) if float < 0.0 => Err(QuantityError::Negative),
                _ => Err(QuantityError::NotAnInteger),
            }
        }
        Value::String(string) => u256_from_str(string),
        other => Err(QuantityError::InvalidType(json_type_name(other))),
    }
}

pub fn u256_from_str(value: &str) -> Result<U256, QuantityError> {
    let value = value.trim();
    if value.starts_with('-') {
        return Err(QuantityError::Negative);
    }
    if let Some(digits) = value.strip_prefix("0x") {
        if digits.is_empty() {
            return Err(QuantityError::InvalidFormat(value.to_owned()));
        }
        if digits.len() > 64 && digits.trim_start_matches('0').len() > 64 {
            return Err(QuantityError::Overflow(256));
        }
        return U256::from_str_radix(digits, 16)
            .map_err(|_| QuantityError::InvalidFormat(value.to_owned()));
    }
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(QuantityError::InvalidFormat(value.to_owned()));
    }
    U256::from_dec_str(value).map_err(|_| QuantityError::Overflow(256))
}

pub fn u64_from_json(value: &Value) -> Result<u64, QuantityError> {
    let quantity = u256_from_json(value)?;
    if quantity > U256::from(u64::MAX) {
        return Err(QuantityError::Overflow(64));
    }
    Ok(quantity.as_u64())
}
