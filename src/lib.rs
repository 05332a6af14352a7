//! Functional test harness for a blockchain daemon's JSON-RPC surface.
//!
//! `scenario` -> `probe` -> `rpc` -> daemon. Each layer only talks to the one
//! below it, and every failure propagates up unchanged as a `HarnessError`.

pub mod cli;
pub mod probe;
pub mod rpc;
pub mod scenario;
pub mod utils;

pub use utils::{HarnessError, Result};
