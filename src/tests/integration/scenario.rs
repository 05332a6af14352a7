//! Scenario runner against the in-memory node: check order, abort semantics
//! and the block-height invariants.

use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use crate::rpc::BlockGenerationRequest;
use crate::scenario::{RunState, Scenario, ScenarioRunner, StableHeightCheck};
use crate::tests::{runner, FakeNode, Generation, ADDR};
use crate::HarnessError;

#[tokio::test]
async fn fresh_node_passes_get_info_check() {
    let node = Arc::new(FakeNode::new(1, 500_000_000));
    let mut r = runner(node.clone(), 5);

    let report = assert_ok!(r.run().await);
    assert_eq!(report.passed_names(), vec!["get_info", "generateblocks"]);
    assert_eq!(r.state(), &RunState::Done);
}

#[tokio::test]
async fn generate_from_height_ten_reports_fourteen() {
    let node = Arc::new(FakeNode::new(10, 1));
    let mut r = runner(node.clone(), 5);

    assert_ok!(r.run().await);
    assert_eq!(*node.height.lock(), 14);
}

#[tokio::test]
async fn zero_height_aborts_before_generating() {
    let node = Arc::new(FakeNode::new(0, 500_000_000));
    let mut r = runner(node.clone(), 5);

    let err = assert_err!(r.run().await);
    match &err {
        HarnessError::Assertion { check, invariant, detail } => {
            assert_eq!(check, "get_info");
            assert_eq!(invariant, "height >= 1");
            assert_eq!(detail, "height = 0");
        }
        other => panic!("expected assertion failure, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert_eq!(r.state(), &RunState::Aborted("get_info"));
    assert_eq!(node.calls(), vec!["get_info"]);
}

#[tokio::test]
async fn negative_free_space_is_an_assertion_failure() {
    let node = Arc::new(FakeNode::new(3, -1));
    let err = assert_err!(runner(node, 5).run().await);
    assert!(matches!(err, HarnessError::Assertion { ref invariant, .. } if invariant == "free_space >= 0"));
}

#[tokio::test]
async fn transport_error_aborts_unchanged() {
    let mut node = FakeNode::new(5, 10);
    node.get_info_error = Some(HarnessError::Transport("connection refused".into()));
    let node = Arc::new(node);
    let mut r = runner(node.clone(), 5);

    let err = assert_err!(r.run().await);
    assert_eq!(err, HarnessError::Transport("connection refused".into()));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(node.calls(), vec!["get_info"]);
    assert_eq!(r.state(), &RunState::Aborted("get_info"));
}

#[tokio::test]
async fn appending_daemon_fails_generate_check_with_expected_and_actual() {
    let mut node = FakeNode::new(10, 1);
    node.generation = Generation::Appending;
    let mut r = runner(Arc::new(node), 5);

    let err = assert_err!(r.run().await);
    match err {
        HarnessError::Assertion { check, detail, .. } => {
            assert_eq!(check, "generateblocks");
            assert!(detail.contains("expected 14"), "{detail}");
            assert!(detail.contains("got 15"), "{detail}");
        }
        other => panic!("expected assertion failure, got {other:?}"),
    }
    assert_eq!(r.state(), &RunState::Aborted("generateblocks"));
}

#[tokio::test]
async fn get_info_check_completes_before_generation_starts() {
    let node = Arc::new(FakeNode::new(7, 100));
    assert_ok!(runner(node.clone(), 3).run().await);
    // get_info check, baseline capture, then generation
    assert_eq!(node.calls(), vec!["get_info", "get_info", "generateblocks"]);
}

#[tokio::test]
async fn stable_height_check_runs_last_and_catches_drift() {
    let node = Arc::new(FakeNode::new(4, 100));
    let req = BlockGenerationRequest::new(ADDR, 2).unwrap();
    let scenario = Scenario::blockchain(req).with_check(StableHeightCheck);
    assert_eq!(scenario.check_names(), vec!["get_info", "generateblocks", "stable_height"]);

    let report = assert_ok!(ScenarioRunner::new(node.clone(), scenario).run().await);
    assert_eq!(report.passed.len(), 3);

    let mut drifting = FakeNode::new(4, 100);
    drifting.drift = 1;
    let scenario = Scenario::new().with_check(StableHeightCheck);
    let err = assert_err!(ScenarioRunner::new(Arc::new(drifting), scenario).run().await);
    assert!(matches!(err, HarnessError::Assertion { ref check, .. } if check == "stable_height"));
}

#[tokio::test]
async fn empty_scenario_is_done_immediately() {
    let node = Arc::new(FakeNode::new(1, 0));
    let mut r = ScenarioRunner::new(node.clone(), Scenario::default());
    assert_eq!(r.state(), &RunState::Pending);

    let report = assert_ok!(r.run().await);
    assert!(report.passed.is_empty());
    assert_eq!(r.state(), &RunState::Done);
    assert!(node.calls().is_empty());
}

#[tokio::test]
async fn finished_runner_does_not_run_again() {
    let node = Arc::new(FakeNode::new(10, 1));
    let mut r = runner(node.clone(), 5);
    assert_ok!(r.run().await);
    let calls = node.calls();

    let err = assert_err!(r.run().await);
    assert!(matches!(err, HarnessError::InvalidRequest(_)), "{err:?}");
    assert_eq!(r.state(), &RunState::Done);
    assert_eq!(node.calls(), calls);
    assert_eq!(*node.height.lock(), 14);

    let aborted = Arc::new(FakeNode::new(0, 1));
    let mut r = runner(aborted.clone(), 5);
    assert_err!(r.run().await);
    assert_err!(r.run().await);
    assert_eq!(r.state(), &RunState::Aborted("get_info"));
    assert_eq!(aborted.calls(), vec!["get_info"]);
}
