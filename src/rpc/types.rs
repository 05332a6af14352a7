use serde::{Deserialize, Serialize};
use crate::utils::serde_helpers::wide_integer;
use crate::utils::{HarnessError, Result};

/// Status string the daemon attaches to successful responses.
pub const STATUS_OK: &str = "OK";

/// Subset of the daemon's `get_info` result the harness looks at.
/// Fetched fresh for every check, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Number of blocks in the chain.
    pub height: i64,
    /// Bytes of storage available to the daemon.
    #[serde(deserialize_with = "wide_integer")]
    pub free_space: i128,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub target_height: Option<u64>,
    #[serde(default)]
    pub top_block_hash: Option<String>,
}

/// Result of `generateblocks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateBlocksResult {
    /// Chain height reported once generation finished.
    pub height: i64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parameters for a synchronous block generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGenerationRequest {
    reward_address: String,
    count: u64,
}

impl BlockGenerationRequest {
    /// Address format is left to the daemon; only emptiness is rejected here.
    pub fn new(reward_address: impl Into<String>, count: u64) -> Result<Self> {
        let reward_address = reward_address.into();
        if reward_address.trim().is_empty() {
            return Err(HarnessError::InvalidRequest("reward address must not be empty".into()));
        }
        if count == 0 {
            return Err(HarnessError::InvalidRequest("block count must be positive".into()));
        }
        Ok(Self { reward_address, count })
    }

    pub fn reward_address(&self) -> &str {
        &self.reward_address
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
