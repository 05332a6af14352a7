use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use crate::probe::DaemonProbe;
use crate::rpc::JsonRpcTransport;
use crate::scenario::{Scenario, ScenarioReport, ScenarioRunner, StableHeightCheck};
use crate::utils::init_logging;

pub mod config;

pub use config::HarnessConfig;

/// Blockchain RPC functional test.
///
/// With no flags, runs `get_info` and `generateblocks` checks against the
/// local test daemon.
#[derive(Parser, Debug)]
#[clap(name = "rpc-harness", version)]
pub struct Cli {
    /// TOML config file; flags below override its values
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Daemon RPC host
    #[clap(long)]
    pub host: Option<String>,

    /// Daemon RPC port
    #[clap(long)]
    pub port: Option<u16>,

    /// Number of blocks the generateblocks check asks for
    #[clap(long)]
    pub blocks: Option<u64>,

    /// Also check that consecutive get_info calls agree on height
    #[clap(long)]
    pub stable_height: bool,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Resolve the effective config: file (or defaults), then flag overrides.
    pub fn harness_config(&self) -> crate::utils::Result<HarnessConfig> {
        let mut cfg = match &self.config {
            Some(path) => HarnessConfig::load(path)?,
            None => HarnessConfig::default(),
        };
        if let Some(host) = &self.host {
            cfg.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(blocks) = self.blocks {
            cfg.blocks = blocks;
        }
        cfg.stable_height_check |= self.stable_height;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Build the daemon stack from `cfg` and run the blockchain scenario.
pub async fn run_scenario(cfg: &HarnessConfig) -> crate::utils::Result<ScenarioReport> {
    let transport = Arc::new(JsonRpcTransport::new(&cfg.endpoint(), cfg.request_timeout())?);
    let probe = Arc::new(DaemonProbe::new(transport));

    let mut scenario = Scenario::blockchain(cfg.block_request()?);
    if cfg.stable_height_check {
        scenario = scenario.with_check(StableHeightCheck);
    }

    info!(endpoint = %cfg.endpoint(), checks = ?scenario.check_names(), "running scenario");
    ScenarioRunner::new(probe, scenario).run().await
}

pub async fn run_cli() -> Result<ScenarioReport> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let cfg = cli.harness_config().context("loading harness config")?;
    let report = run_scenario(&cfg)
        .await
        .with_context(|| format!("blockchain scenario against {}", cfg.endpoint()))?;
    Ok(report)
}
