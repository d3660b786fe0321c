use async_trait::async_trait;
use tevm_common::{
    Address, U256,
    types::{BlockTag, CallParams, CallResult, SetAccountParams},
};

use crate::events::CallEvents;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("State error: {0}")]
    State(String),
    #[error("Block {0} not found")]
    BlockNotFound(BlockTag),
    #[error("Execution error: {0}")]
    Execution(String),
    #[error("Invalid account update: {0}")]
    InvalidAccount(String),
    #[error("{0}")]
    Custom(String),
}

/// Execution backend the actions run against. The VM, its state and the
/// chain live behind this trait.
///
/// EVM level failures (reverts, out of gas) are reported through
/// [`CallResult::error`], `Err` is reserved for the backend itself failing.
#[async_trait]
pub trait TevmClient: Send + Sync {
    async fn set_account(&self, params: SetAccountParams) -> Result<(), ClientError>;

    async fn get_balance(&self, address: Address, block: &BlockTag) -> Result<U256, ClientError>;

    async fn call(&self, params: CallParams, events: &CallEvents) -> Result<CallResult, ClientError>;
}
