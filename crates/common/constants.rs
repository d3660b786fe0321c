use ethereum_types::{Address, H160};

// === Block tags ===

pub const BLOCK_TAG_LATEST: &str = "latest";
pub const BLOCK_TAG_EARLIEST: &str = "earliest";
pub const BLOCK_TAG_PENDING: &str = "pending";
pub const BLOCK_TAG_SAFE: &str = "safe";
pub const BLOCK_TAG_FINALIZED: &str = "finalized";

pub const NAMED_BLOCK_TAGS: [&str; 5] = [
    BLOCK_TAG_LATEST,
    BLOCK_TAG_EARLIEST,
    BLOCK_TAG_PENDING,
    BLOCK_TAG_SAFE,
    BLOCK_TAG_FINALIZED,
];

// === Native token ===

/// Pseudo-address used to report native token balance changes.
/// 0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee
pub const NATIVE_TOKEN_ADDRESS: Address = H160([0xee; 20]);
pub const NATIVE_TOKEN_SYMBOL: &str = "ETH";
pub const NATIVE_TOKEN_DECIMALS: u8 = 18;

// === Sizes ===

pub const ADDRESS_HEX_LENGTH: usize = 42;
pub const STORAGE_ROOT_HEX_DIGITS: usize = 64;
pub const WORD_SIZE: usize = 32;

/// Maximum number of calls accepted in a single simulation batch.
pub const MAX_SIMULATE_CALLS: usize = 256;
