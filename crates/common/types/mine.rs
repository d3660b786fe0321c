use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_count: Option<u64>,
    /// Seconds between mined blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_fail: Option<bool>,
}

impl MineParams {
    pub fn block_count(&self) -> u64 {
        self.block_count.unwrap_or(1)
    }

    pub fn interval(&self) -> u64 {
        self.interval.unwrap_or(1)
    }
}
