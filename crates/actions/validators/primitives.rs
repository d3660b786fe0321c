use serde_json::Value;
use tevm_common::{
    abi::AbiItemKind,
    constants::{ADDRESS_HEX_LENGTH, NAMED_BLOCK_TAGS, STORAGE_ROOT_HEX_DIGITS},
    types::{BlockTag, TransactionMode},
    utils::{hex_digits, is_hex, json_type_name, u256_from_json, u64_from_json},
};

pub fn validate_hex(value: &Value) -> Result<(), String> {
    match value {
        Value::String(hex) if is_hex(hex) => Ok(()),
        Value::String(other) => Err(format!("'{other}' is not a 0x-prefixed hex string")),
        other => Err(format!("expected a hex string, got {}", json_type_name(other))),
    }
}

pub fn validate_address(value: &Value) -> Result<(), String> {
    validate_hex(value)?;
    match value.as_str() {
        Some(address) if address.len() == ADDRESS_HEX_LENGTH => Ok(()),
        Some(address) => Err(format!(
            "address must be {ADDRESS_HEX_LENGTH} characters long, got {}",
            address.len()
        )),
        None => Err("expected an address".to_string()),
    }
}

/// A named tag, a non-negative integer, or a hex string that reads as a
/// 64-bit block number or a 32-byte block hash.
pub fn validate_block_param(value: &Value) -> Result<(), String> {
    match value {
        Value::String(tag) if NAMED_BLOCK_TAGS.contains(&tag.as_str()) => Ok(()),
        Value::String(tag) => {
            validate_hex(value).map_err(|_| {
                format!(
                    "expected one of {} or a hex string",
                    NAMED_BLOCK_TAGS.join(", ")
                )
            })?;
            tag.parse::<BlockTag>().map(|_| ()).map_err(|e| e.to_string())
        }
        Value::Number(_) => validate_integer(value),
        other => Err(format!(
            "expected a block tag, number or hex string, got {}",
            json_type_name(other)
        )),
    }
}

/// Even and non-zero number of hex digits.
pub fn validate_bytecode(value: &Value) -> Result<(), String> {
    validate_hex(value)?;
    let digits = hex_digits(value.as_str().unwrap_or_default());
    if digits.is_empty() {
        return Err("bytecode must not be empty".to_string());
    }
    if digits.len() % 2 != 0 {
        return Err("bytecode must have an even number of hex chars".to_string());
    }
    Ok(())
}

pub fn validate_storage_root(value: &Value) -> Result<(), String> {
    validate_hex(value)?;
    let digits = hex_digits(value.as_str().unwrap_or_default());
    if digits.len() != STORAGE_ROOT_HEX_DIGITS {
        return Err(format!(
            "expected {STORAGE_ROOT_HEX_DIGITS} hex digits, got {}",
            digits.len()
        ));
    }
    Ok(())
}

pub fn validate_abi(value: &Value) -> Result<(), String> {
    let Value::Array(items) = value else {
        return Err(format!("abi must be an array, got {}", json_type_name(value)));
    };
    for (index, item) in items.iter().enumerate() {
        let Some(item) = item.as_object() else {
            return Err(format!("abi[{index}] must be an object"));
        };
        match item.get("type").and_then(Value::as_str) {
            Some(kind) if AbiItemKind::ALL.contains(&kind) => {}
            Some(kind) => {
                return Err(format!(
                    "abi[{index}] has type '{kind}', expected one of {}",
                    AbiItemKind::ALL.join(", ")
                ));
            }
            None => return Err(format!("abi[{index}] is missing its type")),
        }
    }
    Ok(())
}

/// Non-negative integer as a JSON number or a hex/decimal string.
pub fn validate_quantity(value: &Value) -> Result<(), String> {
    u256_from_json(value).map(|_| ()).map_err(|e| e.to_string())
}

/// Like [`validate_quantity`], bounded to 64 bits.
pub fn validate_u64_quantity(value: &Value) -> Result<(), String> {
    u64_from_json(value).map(|_| ()).map_err(|e| e.to_string())
}

/// Non-negative integer JSON number.
pub fn validate_integer(value: &Value) -> Result<(), String> {
    let Value::Number(number) = value else {
        return Err(format!("expected a number, got {}", json_type_name(value)));
    };
    if number.as_u64().is_some() {
        return Ok(());
    }
    if number.as_i64().is_some() || number.as_f64().is_some_and(|f| f < 0.0) {
        return Err("must be a non-negative integer".to_string());
    }
    Err("must be an integer".to_string())
}

pub fn validate_bool(value: &Value) -> Result<(), String> {
    match value {
        Value::Bool(_) => Ok(()),
        other => Err(format!("expected a boolean, got {}", json_type_name(other))),
    }
}

pub fn validate_string(value: &Value) -> Result<(), String> {
    match value {
        Value::String(_) => Ok(()),
        other => Err(format!("expected a string, got {}", json_type_name(other))),
    }
}

pub fn validate_non_empty_string(value: &Value) -> Result<(), String> {
    match value {
        Value::String(string) if !string.is_empty() => Ok(()),
        Value::String(_) => Err("must not be empty".to_string()),
        other => Err(format!("expected a string, got {}", json_type_name(other))),
    }
}

pub fn validate_array(value: &Value) -> Result<(), String> {
    match value {
        Value::Array(_) => Ok(()),
        other => Err(format!("expected an array, got {}", json_type_name(other))),
    }
}

/// A boolean or one of `on-success`, `always`, `never`.
pub fn validate_transaction_intent(value: &Value) -> Result<(), String> {
    match value {
        Value::Bool(_) => Ok(()),
        Value::String(mode) if TransactionMode::ALL.contains(&mode.as_str()) => Ok(()),
        _ => Err(format!(
            "expected a boolean or one of {}",
            TransactionMode::ALL.join(", ")
        )),
    }
}

/// Object mapping hex storage slots to hex values.
pub fn validate_storage_map(value: &Value) -> Result<(), String> {
    let Value::Object(entries) = value else {
        return Err(format!("expected an object, got {}", json_type_name(value)));
    };
    for (slot, slot_value) in entries {
        if !is_hex(slot) {
            return Err(format!("storage slot '{slot}' is not hex"));
        }
        validate_hex(slot_value).map_err(|reason| format!("storage slot {slot}: {reason}"))?;
    }
    Ok(())
}
