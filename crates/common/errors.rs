#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("expected a non-negative integer, got a negative value")]
    Negative,
    #[error("expected an integer, got a fractional number")]
    NotAnInteger,
    #[error("value does not fit in {0} bits")]
    Overflow(usize),
    #[error("could not parse '{0}' as a hex or decimal integer")]
    InvalidFormat(String),
    #[error("expected a number or a numeric string, got {0}")]
    InvalidType(&'static str),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("'{0}' is not a 0x-prefixed hex string")]
    NotHex(String),
    #[error("failed to decode hex: {0}")]
    Decode(#[from] hex::FromHexError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockTagError {
    #[error("unknown block tag '{0}'")]
    UnknownTag(String),
    #[error("negative block numbers are not accepted as JSON numbers")]
    NegativeNumber,
    #[error("block number does not fit in 64 bits: {0}")]
    NumberOverflow(String),
    #[error("expected a block tag, number or hex string, got {0}")]
    InvalidType(&'static str),
}
