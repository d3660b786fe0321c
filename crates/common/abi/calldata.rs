use bytes::Bytes;
use ethereum_types::{Address, H32, U256};
use keccak_hash::keccak;
use serde_json::{Number, Value as Json};

use super::AbiError;
use super::param_type::{ParamType, split_params};
use crate::constants::WORD_SIZE;
use crate::utils::{decode_hex, encode_hex, u256_from_str};

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Address(Address),
    Uint(U256),
    /// Two's complement representation.
    Int(U256),
    Bool(bool),
    Bytes(Bytes),
    String(String),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
    FixedArray(Vec<Value>),
    FixedBytes(Bytes),
}

/// Splits `name(type1,type2)` into its name and top-level parameter types.
/// Parameter names (`uint256 amount`) and a leading `function ` are dropped.
pub fn parse_signature(signature: &str) -> Result<(String, Vec<String>), AbiError> {
    let sig = signature.trim().trim_start_matches("function ");
    let (name, params) = sig
        .split_once('(')
        .ok_or_else(|| AbiError::InvalidSignature(signature.to_string()))?;
    let params = params
        .strip_suffix(')')
        .ok_or_else(|| AbiError::InvalidSignature(signature.to_string()))?;
    let params = split_params(params)?
        .into_iter()
        .map(|param| match param.split_once(' ') {
            Some((ty, _name)) if !ty.starts_with('(') => ty.to_string(),
            _ => param,
        })
        .collect();

    Ok((name.trim().to_string(), params))
}

pub fn compute_function_selector(name: &str, params: &[String]) -> Result<H32, AbiError> {
    let normalized_signature = format!("{name}({})", params.join(","));
    let hash = keccak(normalized_signature.as_bytes());

    Ok(H32::from_slice(&hash[..4]))
}

pub fn encode_calldata(signature: &str, values: &[Value]) -> Result<Vec<u8>, AbiError> {
    let (name, params) = parse_signature(signature)?;

    if params.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: params.len(),
            got: values.len(),
        });
    }

    let function_selector = compute_function_selector(&name, &params)?;
    let calldata = encode_tuple(values)?;
    let mut with_selector = function_selector.as_bytes().to_vec();

    with_selector.extend_from_slice(&calldata);

    Ok(with_selector)
}

pub fn decode_calldata(signature: &str, data: Bytes) -> Result<Vec<Value>, AbiError> {
    let (name, params) = parse_signature(signature)?;
    let function_selector = compute_function_selector(&name, &params)?;

    let (selector, body) = data
        .split_at_checked(4)
        .ok_or(AbiError::OutOfBounds(data.len()))?;
    if selector != function_selector.as_bytes() {
        return Err(AbiError::SelectorMismatch);
    }

    let types = params
        .iter()
        .map(|param| ParamType::parse(param))
        .collect::<Result<Vec<_>, _>>()?;

    decode_tuple(&types, body)
}

/// Encodes `values` as an ABI tuple: a head with one slot per value (the value
/// itself when static, an offset into the tail when dynamic) followed by the
/// tail holding the dynamic values in order.
pub fn encode_tuple(values: &[Value]) -> Result<Vec<u8>, AbiError> {
    let mut current_offset = 0;
    let mut current_dynamic_offset = 0;
    for value in values {
        current_dynamic_offset += static_offset_value(value);
    }

    let mut ret = vec![0; current_dynamic_offset];

    for value in values {
        match value {
            Value::Address(h160) => {
                write_u256(&mut ret, address_to_word(*h160), current_offset)?;
            }
            Value::Uint(u256) | Value::Int(u256) => {
                write_u256(&mut ret, *u256, current_offset)?;
            }
            Value::Bool(boolean) => {
                write_u256(&mut ret, U256::from(u8::from(*boolean)), current_offset)?;
            }
            Value::Bytes(bytes) => {
                write_u256(&mut ret, U256::from(current_dynamic_offset), current_offset)?;

                let bytes_encoding = encode_bytes(bytes);
                ret.extend_from_slice(&bytes_encoding);
                current_dynamic_offset += bytes_encoding.len();
            }
            Value::String(string_value) => {
                write_u256(&mut ret, U256::from(current_dynamic_offset), current_offset)?;

                let bytes_encoding = encode_bytes(string_value.as_bytes());
                ret.extend_from_slice(&bytes_encoding);
                current_dynamic_offset += bytes_encoding.len();
            }
            Value::Array(array_values) => {
                write_u256(&mut ret, U256::from(current_dynamic_offset), current_offset)?;

                let array_encoding = encode_array(array_values)?;
                ret.extend_from_slice(&array_encoding);
                current_dynamic_offset += array_encoding.len();
            }
            Value::Tuple(inner) | Value::FixedArray(inner) => {
                let encoding = encode_tuple(inner)?;
                if is_dynamic(value) {
                    write_u256(&mut ret, U256::from(current_dynamic_offset), current_offset)?;
                    ret.extend_from_slice(&encoding);
                    current_dynamic_offset += encoding.len();
                } else {
                    copy_into(&mut ret, &encoding, current_offset)?;
                }
            }
            Value::FixedBytes(bytes) => {
                if bytes.len() > WORD_SIZE {
                    return Err(AbiError::FixedBytesTooLong(bytes.len()));
                }
                let mut to_copy = [0; WORD_SIZE];
                to_copy[..bytes.len()].copy_from_slice(bytes);
                copy_into(&mut ret, &to_copy, current_offset)?;
            }
        }

        current_offset += static_offset_value(value);
    }

    Ok(ret)
}

pub fn decode_tuple(types: &[ParamType], data: &[u8]) -> Result<Vec<Value>, AbiError> {
    let mut values = Vec::with_capacity(types.len());
    let mut head = 0;

    for ty in types {
        let value = if ty.is_dynamic() {
            let offset = read_usize(data, head)?;
            decode_value(ty, data.get(offset..).ok_or(AbiError::OutOfBounds(offset))?)?
        } else {
            decode_value(ty, data.get(head..).ok_or(AbiError::OutOfBounds(head))?)?
        };
        values.push(value);
        head += ty.head_size();
    }

    Ok(values)
}

/// Decodes one value whose encoding starts at `data[0]`.
fn decode_value(ty: &ParamType, data: &[u8]) -> Result<Value, AbiError> {
    match ty {
        ParamType::Address => {
            let word = read_word(data, 0)?;
            Ok(Value::Address(Address::from_slice(&word[12..])))
        }
        ParamType::Uint(_) => Ok(Value::Uint(U256::from_big_endian(read_word(data, 0)?))),
        ParamType::Int(_) => Ok(Value::Int(U256::from_big_endian(read_word(data, 0)?))),
        ParamType::Bool => match U256::from_big_endian(read_word(data, 0)?) {
            flag if flag.is_zero() => Ok(Value::Bool(false)),
            flag if flag == U256::one() => Ok(Value::Bool(true)),
            _ => Err(AbiError::InvalidBool),
        },
        ParamType::FixedBytes(len) => {
            let word = read_word(data, 0)?;
            Ok(Value::FixedBytes(Bytes::copy_from_slice(&word[..*len])))
        }
        ParamType::Bytes => Ok(Value::Bytes(Bytes::copy_from_slice(read_bytes(data)?))),
        ParamType::String => {
            let raw = read_bytes(data)?;
            let string = String::from_utf8(raw.to_vec()).map_err(|_| AbiError::InvalidUtf8)?;
            Ok(Value::String(string))
        }
        ParamType::Array(inner) => {
            let len = read_usize(data, 0)?;
            let body = data.get(WORD_SIZE..).ok_or(AbiError::OutOfBounds(WORD_SIZE))?;
            // every element takes at least one word of head
            if len.saturating_mul(WORD_SIZE) > body.len() {
                return Err(AbiError::OutOfBounds(len));
            }
            let types = vec![inner.as_ref().clone(); len];
            Ok(Value::Array(decode_tuple(&types, body)?))
        }
        ParamType::FixedArray(inner, size) => {
            let types = vec![inner.as_ref().clone(); *size];
            Ok(Value::FixedArray(decode_tuple(&types, data)?))
        }
        ParamType::Tuple(components) => Ok(Value::Tuple(decode_tuple(components, data)?)),
    }
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    data.get(offset..offset + WORD_SIZE)
        .ok_or(AbiError::OutOfBounds(offset))
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let word = U256::from_big_endian(read_word(data, offset)?);
    if word > U256::from(usize::MAX) {
        return Err(AbiError::OutOfBounds(offset));
    }
    Ok(word.as_usize())
}

fn read_bytes(data: &[u8]) -> Result<&[u8], AbiError> {
    let len = read_usize(data, 0)?;
    data.get(WORD_SIZE..WORD_SIZE.saturating_add(len))
        .ok_or(AbiError::OutOfBounds(len))
}

fn write_u256(values: &mut [u8], number: U256, offset: usize) -> Result<(), AbiError> {
    copy_into(values, &number.to_big_endian(), offset)
}

fn static_offset_value(value: &Value) -> usize {
    match value {
        Value::Tuple(vec) | Value::FixedArray(vec) if !is_dynamic(value) => {
            // every element is static here
            vec.iter().map(static_offset_value).sum()
        }
        _ => WORD_SIZE,
    }
}

fn is_dynamic(value: &Value) -> bool {
    match value {
        Value::Bytes(_) | Value::String(_) | Value::Array(_) => true,
        Value::Tuple(vec) => vec.iter().any(is_dynamic),
        Value::FixedArray(vec) => vec.first().is_some_and(is_dynamic),
        _ => false,
    }
}

fn encode_array(values: &[Value]) -> Result<Vec<u8>, AbiError> {
    let mut ret = U256::from(values.len()).to_big_endian().to_vec();

    let tuple_encoding = encode_tuple(values)?;
    ret.extend_from_slice(&tuple_encoding);

    Ok(ret)
}

/// Length word followed by the bytes right-padded to a word boundary.
fn encode_bytes(values: &[u8]) -> Vec<u8> {
    let mut ret = U256::from(values.len()).to_big_endian().to_vec();

    ret.extend_from_slice(values);
    let padding = (WORD_SIZE - values.len() % WORD_SIZE) % WORD_SIZE;
    ret.resize(ret.len() + padding, 0);

    ret
}

fn copy_into(values: &mut [u8], to_copy: &[u8], offset: usize) -> Result<(), AbiError> {
    values
        .get_mut(offset..offset + to_copy.len())
        .ok_or(AbiError::OutOfBounds(offset))?
        .copy_from_slice(to_copy);
    Ok(())
}

fn address_to_word(address: Address) -> U256 {
    let mut word = [0u8; 32];
    for (word_byte, address_byte) in word.iter_mut().skip(12).zip(address.as_bytes().iter()) {
        *word_byte = *address_byte;
    }
    U256::from_big_endian(&word)
}

impl Value {
    /// Builds a value of type `ty` from its JSON rendering. Integers accept JSON
    /// numbers, decimal strings and `0x` hex strings; byte types take hex strings.
    pub fn from_json(ty: &ParamType, json: &Json) -> Result<Value, AbiError> {
        let invalid = |reason: &str| AbiError::InvalidArgument {
            ty: ty.to_string(),
            reason: reason.to_string(),
        };

        match ty {
            ParamType::Address => {
                let raw = json.as_str().ok_or_else(|| invalid("expected a string"))?;
                let bytes = decode_hex(raw).map_err(|e| invalid(&e.to_string()))?;
                if bytes.len() != 20 {
                    return Err(invalid("expected 20 bytes"));
                }
                Ok(Value::Address(Address::from_slice(&bytes)))
            }
            ParamType::Uint(bits) => {
                let raw = integer_string(json).ok_or_else(|| invalid("expected an integer"))?;
                let value = u256_from_str(&raw).map_err(|e| invalid(&e.to_string()))?;
                if *bits < 256 && value.bits() > *bits {
                    return Err(invalid("value out of range"));
                }
                Ok(Value::Uint(value))
            }
            ParamType::Int(bits) => {
                let raw = integer_string(json).ok_or_else(|| invalid("expected an integer"))?;
                let (negative, magnitude) = match raw.strip_prefix('-') {
                    Some(magnitude) => (true, magnitude),
                    None => (false, raw.as_str()),
                };
                let magnitude = u256_from_str(magnitude).map_err(|e| invalid(&e.to_string()))?;
                // |min| is 2^(bits-1), |max| is 2^(bits-1) - 1
                let limit = U256::one() << (*bits - 1);
                if magnitude > limit || (!negative && magnitude == limit) {
                    return Err(invalid("value out of range"));
                }
                if negative {
                    Ok(Value::Int((!magnitude).overflowing_add(U256::one()).0))
                } else {
                    Ok(Value::Int(magnitude))
                }
            }
            ParamType::Bool => json
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| invalid("expected a boolean")),
            ParamType::String => json
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| invalid("expected a string")),
            ParamType::Bytes => {
                let raw = json.as_str().ok_or_else(|| invalid("expected a hex string"))?;
                let bytes = decode_hex(raw).map_err(|e| invalid(&e.to_string()))?;
                Ok(Value::Bytes(Bytes::from(bytes)))
            }
            ParamType::FixedBytes(len) => {
                let raw = json.as_str().ok_or_else(|| invalid("expected a hex string"))?;
                let bytes = decode_hex(raw).map_err(|e| invalid(&e.to_string()))?;
                if bytes.len() > *len {
                    return Err(invalid("too many bytes"));
                }
                let mut padded = vec![0; *len];
                padded[..bytes.len()].copy_from_slice(&bytes);
                Ok(Value::FixedBytes(Bytes::from(padded)))
            }
            ParamType::Array(inner) => {
                let items = json.as_array().ok_or_else(|| invalid("expected an array"))?;
                let values = items
                    .iter()
                    .map(|item| Value::from_json(inner, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(values))
            }
            ParamType::FixedArray(inner, size) => {
                let items = json.as_array().ok_or_else(|| invalid("expected an array"))?;
                if items.len() != *size {
                    return Err(invalid("wrong array length"));
                }
                let values = items
                    .iter()
                    .map(|item| Value::from_json(inner, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::FixedArray(values))
            }
            ParamType::Tuple(components) => {
                let items = json.as_array().ok_or_else(|| invalid("expected an array"))?;
                if items.len() != components.len() {
                    return Err(invalid("wrong tuple length"));
                }
                let values = components
                    .iter()
                    .zip(items)
                    .map(|(component, item)| Value::from_json(component, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Tuple(values))
            }
        }
    }

    /// JSON rendering of a decoded value. Integers become decimal strings since
    /// they may not fit a JSON number.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Address(address) => Json::String(format!("{address:#x}")),
            Value::Uint(value) => Json::String(value.to_string()),
            Value::Int(value) => {
                if value.bit(255) {
                    let magnitude = (!*value).overflowing_add(U256::one()).0;
                    Json::String(format!("-{magnitude}"))
                } else {
                    Json::String(value.to_string())
                }
            }
            Value::Bool(flag) => Json::Bool(*flag),
            Value::Bytes(bytes) | Value::FixedBytes(bytes) => Json::String(encode_hex(bytes)),
            Value::String(string) => Json::String(string.clone()),
            Value::Array(values) | Value::Tuple(values) | Value::FixedArray(values) => {
                Json::Array(values.iter().map(Value::to_json).collect())
            }
        }
    }
}

fn integer_string(json: &Json) -> Option<String> {
    match json {
        Json::Number(number) => integer_number(number),
        Json::String(string) => Some(string.clone()),
        _ => None,
    }
}

fn integer_number(number: &Number) -> Option<String> {
    if let Some(n) = number.as_u64() {
        return Some(n.to_string());
    }
    number.as_i64().map(|n| n.to_string())
}
