use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};
use crate::probe::NodeProbe;
use crate::rpc::BlockGenerationRequest;
use crate::scenario::checks::{Check, GenerateBlocksCheck, GetInfoCheck};
use crate::utils::{HarnessError, Result, METRICS};

/// Ordered list of named checks.
pub struct Scenario {
    checks: Vec<Box<dyn Check>>,
}

impl Scenario {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// The blockchain RPC scenario: `get_info`, then `generateblocks`.
    pub fn blockchain(request: BlockGenerationRequest) -> Self {
        Self::new()
            .with_check(GetInfoCheck)
            .with_check(GenerateBlocksCheck::new(request))
    }

    /// Append a check; it runs after every check already present.
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a run currently is. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Running(&'static str),
    Done,
    Aborted(&'static str),
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub elapsed: Duration,
}

/// Produced only when every check passed.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub passed: Vec<CheckOutcome>,
    pub elapsed: Duration,
}

impl ScenarioReport {
    pub fn passed_names(&self) -> Vec<&'static str> {
        self.passed.iter().map(|c| c.name).collect()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checks passed in {:?}: {}",
            self.passed.len(),
            self.elapsed,
            self.passed_names().join(", ")
        )
    }
}

/// Runs a scenario's checks one after another against a single probe.
///
/// The first failing check moves the runner to `Aborted` and its error is
/// returned unchanged; later checks never start. A runner runs once: calling
/// `run` again after it left `Pending` fails without touching the node.
pub struct ScenarioRunner {
    probe: Arc<dyn NodeProbe>,
    scenario: Scenario,
    state: RunState,
}

impl ScenarioRunner {
    pub fn new(probe: Arc<dyn NodeProbe>, scenario: Scenario) -> Self {
        Self { probe, scenario, state: RunState::Pending }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<ScenarioReport> {
        if self.state != RunState::Pending {
            return Err(HarnessError::InvalidRequest(format!(
                "scenario runner already used (state {:?})",
                self.state
            )));
        }
        let started = Instant::now();
        let mut passed = Vec::with_capacity(self.scenario.len());

        for check in &self.scenario.checks {
            let name = check.name();
            self.state = RunState::Running(name);
            info!("Test {}", name);

            let t0 = Instant::now();
            if let Err(e) = check.run(self.probe.as_ref()).await {
                self.state = RunState::Aborted(name);
                error!(check = name, "scenario aborted: {}", e);
                log_rpc_summary();
                return Err(e);
            }
            let elapsed = t0.elapsed();
            info!(check = name, ?elapsed, "passed");
            passed.push(CheckOutcome { name, elapsed });
        }

        self.state = RunState::Done;
        log_rpc_summary();
        Ok(ScenarioReport { passed, elapsed: started.elapsed() })
    }
}

fn log_rpc_summary() {
    let snap = METRICS.snapshot();
    info!(
        calls = snap.total_calls(),
        failures = snap.total_failures(),
        per_method = ?snap.calls,
        "rpc summary"
    );
}
