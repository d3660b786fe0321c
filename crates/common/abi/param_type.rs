use std::fmt;
use std::str::FromStr;

use super::AbiError;
use crate::constants::WORD_SIZE;

/// A Solidity type as it appears in a canonical function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    Bool,
    Uint(usize),
    Int(usize),
    Bytes,
    FixedBytes(usize),
    String,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<ParamType>),
}

impl ParamType {
    pub fn parse(raw: &str) -> Result<Self, AbiError> {
        let raw = raw.trim();

        if let Some(without_bracket) = raw.strip_suffix(']') {
            let open = without_bracket
                .rfind('[')
                .ok_or_else(|| AbiError::InvalidType(raw.to_string()))?;
            let inner = Box::new(ParamType::parse(&without_bracket[..open])?);
            let size = &without_bracket[open + 1..];
            if size.is_empty() {
                return Ok(ParamType::Array(inner));
            }
            let size = size
                .parse::<usize>()
                .map_err(|_| AbiError::InvalidType(raw.to_string()))?;
            return Ok(ParamType::FixedArray(inner, size));
        }

        if let Some(body) = raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            let components = split_params(body)?
                .iter()
                .map(|component| ParamType::parse(component))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(ParamType::Tuple(components));
        }

        match raw {
            "address" => Ok(ParamType::Address),
            "bool" => Ok(ParamType::Bool),
            "string" => Ok(ParamType::String),
            "bytes" => Ok(ParamType::Bytes),
            "uint" => Ok(ParamType::Uint(256)),
            "int" => Ok(ParamType::Int(256)),
            _ => {
                if let Some(bits) = raw.strip_prefix("uint") {
                    parse_bits(raw, bits).map(ParamType::Uint)
                } else if let Some(bits) = raw.strip_prefix("int") {
                    parse_bits(raw, bits).map(ParamType::Int)
                } else if let Some(len) = raw.strip_prefix("bytes") {
                    match len.parse::<usize>() {
                        Ok(len) if (1..=WORD_SIZE).contains(&len) => Ok(ParamType::FixedBytes(len)),
                        _ => Err(AbiError::InvalidType(raw.to_string())),
                    }
                } else {
                    Err(AbiError::InvalidType(raw.to_string()))
                }
            }
        }
    }

    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, size) => *size > 0 && inner.is_dynamic(),
            ParamType::Tuple(components) => components.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// Bytes this type takes in the head of an enclosing tuple.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            ParamType::FixedArray(inner, size) => inner.head_size() * size,
            ParamType::Tuple(components) => components.iter().map(ParamType::head_size).sum(),
            _ => WORD_SIZE,
        }
    }
}

fn parse_bits(raw: &str, bits: &str) -> Result<usize, AbiError> {
    match bits.parse::<usize>() {
        Ok(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits),
        _ => Err(AbiError::InvalidType(raw.to_string())),
    }
}

/// Splits a comma separated parameter list at the top nesting level, so
/// `uint256,(address,bytes),bool` yields three entries.
pub fn split_params(params: &str) -> Result<Vec<String>, AbiError> {
    let params = params.trim();
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut current = String::new();
    for c in params.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AbiError::InvalidSignature(params.to_string()))?;
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return Err(AbiError::InvalidSignature(params.to_string()));
    }
    parts.push(current.trim().to_string());

    Ok(parts)
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamType::parse(s)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
            ParamType::String => write!(f, "string"),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, size) => write!(f, "{inner}[{size}]"),
            ParamType::Tuple(components) => {
                write!(f, "(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{component}")?;
                }
                write!(f, ")")
            }
        }
    }
}
