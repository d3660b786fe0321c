use serde::{Deserialize, Serialize};

/// Whether a call-like action should also produce a transaction, and when.
///
/// Accepted on the wire as a boolean or one of `"on-success"`, `"always"`, `"never"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionIntent {
    Flag(bool),
    Mode(TransactionMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionMode {
    OnSuccess,
    Always,
    Never,
}

impl TransactionMode {
    pub const ALL: [&'static str; 3] = ["on-success", "always", "never"];
}

impl TransactionIntent {
    /// `"never"` and `false` request nothing.
    pub fn is_requested(&self) -> bool {
        match self {
            TransactionIntent::Flag(flag) => *flag,
            TransactionIntent::Mode(TransactionMode::Never) => false,
            TransactionIntent::Mode(_) => true,
        }
    }
}

impl Default for TransactionIntent {
    fn default() -> Self {
        TransactionIntent::Flag(false)
    }
}
