//! Fuzz tests: randomized baselines and block counts through the runner, and
//! garbage `get_info` replies through the probe.

use std::sync::Arc;
use async_trait::async_trait;
use rand::Rng;
use serde_json::{json, Value};
use tokio_test::assert_ok;
use crate::probe::{DaemonProbe, NodeProbe};
use crate::rpc::RpcTransport;
use crate::tests::{runner, FakeNode};
use crate::{HarnessError, Result};

#[tokio::test]
async fn random_baselines_and_counts_hold_the_height_invariant() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let h: i64 = rng.gen_range(1..1_000_000);
        let n: u64 = rng.gen_range(1..100);
        let node = Arc::new(FakeNode::new(h, rng.gen_range(0..i128::from(u64::MAX))));

        assert_ok!(runner(node.clone(), n).run().await);
        assert_eq!(*node.height.lock(), h + n as i64 - 1);
    }
}

/// Replies to every call with the same canned value.
struct Canned(Value);

#[async_trait]
impl RpcTransport for Canned {
    async fn call(&self, _method: &str, _params: Value) -> Result<Value> {
        Ok(self.0.clone())
    }
}

fn random_value(rng: &mut impl Rng) -> Value {
    match rng.gen_range(0..6) {
        0 => Value::Null,
        1 => json!(rng.gen::<i64>()),
        2 => json!(rng.gen::<f64>()),
        3 => json!(rng.gen::<u64>().to_string()),
        4 => json!(rng.gen::<bool>()),
        _ => json!([rng.gen::<u8>()]),
    }
}

#[tokio::test]
async fn garbage_get_info_replies_never_panic() {
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let mut reply = serde_json::Map::new();
        for key in ["height", "free_space", "status", "target_height"] {
            if rng.gen_bool(0.7) {
                reply.insert(key.to_string(), random_value(&mut rng));
            }
        }
        let probe = DaemonProbe::new(Arc::new(Canned(Value::Object(reply))));

        match probe.get_info().await {
            Ok(info) => assert!(info.status.is_none() || info.status.as_deref() == Some("OK")),
            Err(e) => assert!(matches!(e, HarnessError::Protocol { .. }), "{e:?}"),
        }
    }
}
