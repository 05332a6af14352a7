use std::collections::BTreeMap;
use std::sync::Arc;
use lazy_static::lazy_static;
use parking_lot::Mutex;

/// Per-method RPC counters for the run summary.
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    calls: Arc<Mutex<BTreeMap<String, u64>>>,
    failures: Arc<Mutex<BTreeMap<String, u64>>>,
}

/// Point-in-time copy of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub calls: BTreeMap<String, u64>,
    pub failures: BTreeMap<String, u64>,
}

impl MetricsSnapshot {
    pub fn total_calls(&self) -> u64 {
        self.calls.values().sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.failures.values().sum()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call(&self, method: &str) {
        *self.calls.lock().entry(method.to_string()).or_insert(0) += 1;
    }

    pub fn record_failure(&self, method: &str) {
        *self.failures.lock().entry(method.to_string()).or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: self.calls.lock().clone(),
            failures: self.failures.lock().clone(),
        }
    }
}

lazy_static! {
    pub static ref METRICS: MetricsRegistry = MetricsRegistry::new();
}
