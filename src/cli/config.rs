use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::Deserialize;
use crate::rpc::BlockGenerationRequest;
use crate::utils::{HarnessError, Result};

/// Address the generated block rewards go to.
pub const DEFAULT_REWARD_ADDRESS: &str =
    "42ey1afDFnn4886T7196doS9GPMzexD9gXpsZJDwVjeRVdFCSoHnv7KPbBeGpzJBzHRCAs9UxqeoyFQMYbqSWYTfJJQAWDm";

/// Where the functional test daemon listens.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 18180;
pub const DEFAULT_RPC_PATH: &str = "/json_rpc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BLOCKS: u64 = 5;

/// Harness configuration, optionally loaded from a TOML file.
/// Missing keys fall back to the functional-test defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub host: String,
    pub port: u16,
    pub rpc_path: String,
    pub request_timeout_secs: u64,
    pub reward_address: String,
    pub blocks: u64,
    pub stable_height_check: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            reward_address: DEFAULT_REWARD_ADDRESS.to_string(),
            blocks: DEFAULT_BLOCKS,
            stable_height_check: false,
        }
    }
}

impl HarnessConfig {
    /// Load config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| HarnessError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| HarnessError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(HarnessError::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(HarnessError::Config("port must be non-zero".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(HarnessError::Config("request_timeout_secs must be non-zero".into()));
        }
        if !self.rpc_path.starts_with('/') {
            return Err(HarnessError::Config(format!("rpc_path must start with '/': {}", self.rpc_path)));
        }
        // address and block count share the request's own rules
        self.block_request().map_err(|e| match e {
            HarnessError::InvalidRequest(msg) => HarnessError::Config(msg),
            other => other,
        })?;
        Ok(())
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.rpc_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn block_request(&self) -> Result<BlockGenerationRequest> {
        BlockGenerationRequest::new(self.reward_address.clone(), self.blocks)
    }
}
