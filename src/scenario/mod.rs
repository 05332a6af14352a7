//! Scenario runner: ordered checks over a `NodeProbe`, aborting on the first
//! failure.

pub mod checks;
pub mod runner;

pub use checks::{Check, GenerateBlocksCheck, GetInfoCheck, StableHeightCheck};
pub use runner::{CheckOutcome, RunState, Scenario, ScenarioReport, ScenarioRunner};
