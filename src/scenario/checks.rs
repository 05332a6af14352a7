use async_trait::async_trait;
use tracing::info;
use crate::probe::NodeProbe;
use crate::rpc::BlockGenerationRequest;
use crate::utils::{HarnessError, Result};

/// One named step of a scenario. A check either passes or returns the error
/// that aborts the run.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, probe: &dyn NodeProbe) -> Result<()>;
}

/// `get_info` reports a sane node: `free_space >= 0` and `height >= 1`.
pub struct GetInfoCheck;

#[async_trait]
impl Check for GetInfoCheck {
    fn name(&self) -> &'static str {
        "get_info"
    }

    async fn run(&self, probe: &dyn NodeProbe) -> Result<()> {
        let info = probe.get_info().await?;

        if info.free_space < 0 {
            return Err(HarnessError::assertion(
                self.name(),
                "free_space >= 0",
                format!("free_space = {}", info.free_space),
            ));
        }
        if info.height < 1 {
            return Err(HarnessError::assertion(
                self.name(),
                "height >= 1",
                format!("height = {}", info.height),
            ));
        }
        Ok(())
    }
}

/// Generating `N` blocks from height `H` reports height `H + N - 1`.
///
/// The `- 1` matches what the daemon's `generateblocks` reports; keep it until
/// the daemon's block counting says otherwise.
pub struct GenerateBlocksCheck {
    request: BlockGenerationRequest,
}

impl GenerateBlocksCheck {
    pub fn new(request: BlockGenerationRequest) -> Self {
        Self { request }
    }

    /// Height the daemon must report after generating `count` blocks from `baseline`.
    pub fn expected_height(baseline: i64, count: u64) -> i128 {
        i128::from(baseline) + i128::from(count) - 1
    }
}

#[async_trait]
impl Check for GenerateBlocksCheck {
    fn name(&self) -> &'static str {
        "generateblocks"
    }

    async fn run(&self, probe: &dyn NodeProbe) -> Result<()> {
        let baseline = probe.get_info().await?.height;
        info!(blocks = self.request.count(), baseline, "generating blocks");

        let res = probe.generate_blocks(&self.request).await?;
        let expected = Self::expected_height(baseline, self.request.count());
        if i128::from(res.height) != expected {
            return Err(HarnessError::assertion(
                self.name(),
                "height == baseline + blocks - 1",
                format!(
                    "expected {expected} (baseline {baseline} + {} - 1), got {}",
                    self.request.count(),
                    res.height
                ),
            ));
        }
        Ok(())
    }
}

/// Two back-to-back `get_info` calls with no block generation in between
/// agree on the height.
pub struct StableHeightCheck;

#[async_trait]
impl Check for StableHeightCheck {
    fn name(&self) -> &'static str {
        "stable_height"
    }

    async fn run(&self, probe: &dyn NodeProbe) -> Result<()> {
        let first = probe.get_info().await?.height;
        let second = probe.get_info().await?.height;
        if first != second {
            return Err(HarnessError::assertion(
                self.name(),
                "consecutive get_info heights are equal",
                format!("first = {first}, second = {second}"),
            ));
        }
        Ok(())
    }
}
