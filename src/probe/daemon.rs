use std::sync::Arc;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;
use crate::rpc::{BlockGenerationRequest, GenerateBlocksResult, NodeInfo, RpcTransport, STATUS_OK};
use crate::utils::{HarnessError, Result, METRICS};

pub const METHOD_GET_INFO: &str = "get_info";
pub const METHOD_GENERATE_BLOCKS: &str = "generateblocks";

/// Extra bytes the daemon reserves in each generated block template.
pub const RESERVE_SIZE: u32 = 20;

/// Domain operations the scenario checks rely on.
/// Implement this over a real daemon, or with an in-memory fake in tests.
#[async_trait]
pub trait NodeProbe: Send + Sync {
    async fn get_info(&self) -> Result<NodeInfo>;

    /// Blocks until every requested block has been produced.
    async fn generate_blocks(&self, req: &BlockGenerationRequest) -> Result<GenerateBlocksResult>;
}

/// Probe that talks to a daemon through an `RpcTransport`.
pub struct DaemonProbe<T: RpcTransport> {
    transport: Arc<T>,
}

impl<T: RpcTransport> DaemonProbe<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: RpcTransport> NodeProbe for DaemonProbe<T> {
    async fn get_info(&self) -> Result<NodeInfo> {
        let raw = self.transport.call(METHOD_GET_INFO, Value::Null).await?;
        let info: NodeInfo = decode(METHOD_GET_INFO, raw)?;
        check_status(METHOD_GET_INFO, info.status.as_deref())?;
        debug!(
            height = info.height,
            free_space = %info.free_space,
            target_height = ?info.target_height,
            top_block_hash = ?info.top_block_hash,
            "get_info"
        );
        Ok(info)
    }

    async fn generate_blocks(&self, req: &BlockGenerationRequest) -> Result<GenerateBlocksResult> {
        let params = json!({
            "amount_of_blocks": req.count(),
            "wallet_address": req.reward_address(),
            "reserve_size": RESERVE_SIZE,
        });
        let raw = self.transport.call(METHOD_GENERATE_BLOCKS, params).await?;
        let res: GenerateBlocksResult = decode(METHOD_GENERATE_BLOCKS, raw)?;
        check_status(METHOD_GENERATE_BLOCKS, res.status.as_deref())?;
        debug!(count = req.count(), height = res.height, "generateblocks");
        Ok(res)
    }
}

fn decode<R: DeserializeOwned>(method: &str, raw: Value) -> Result<R> {
    serde_json::from_value(raw).map_err(|e| {
        METRICS.record_failure(method);
        HarnessError::protocol(method, format!("unexpected result shape: {e}"))
    })
}

// an absent status is accepted, some daemons only report it on failure
fn check_status(method: &str, status: Option<&str>) -> Result<()> {
    match status {
        None | Some(STATUS_OK) => Ok(()),
        Some(other) => {
            METRICS.record_failure(method);
            Err(HarnessError::protocol(method, format!("daemon status {other}")))
        }
    }
}
