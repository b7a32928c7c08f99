mod support;

use integration_test_utils::InMemoryBroker;
use servicebus_entities::{delete_entity_blocking, DeleteOutcome, EntityKind, LifecycleError};
use std::sync::Arc;
use support::{make_default_harness, provision_all};

fn provision_on_scratch_runtime(harness: &support::Harness, addresses: &[&str]) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("scratch runtime");
    runtime.block_on(provision_all(&harness.manager, addresses));
}

#[test]
fn teardown_from_a_plain_thread() {
    let harness = make_default_harness();
    provision_on_scratch_runtime(&harness, &["plain-a", "plain-b"]);

    let report = harness
        .manager
        .teardown_all_blocking()
        .expect("blocking teardown");

    assert_eq!(report.deleted.len(), 2);
    assert!(harness.broker.queues().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn teardown_from_a_current_thread_runtime_does_not_deadlock() {
    let harness = make_default_harness();
    provision_all(&harness.manager, &["current-thread"]).await;

    let report = harness
        .manager
        .teardown_all_blocking()
        .expect("blocking teardown");

    assert_eq!(report.deleted, vec!["current-thread".to_string()]);
    assert_eq!(harness.builder.counts("current-thread").disposals, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn teardown_from_a_multi_thread_runtime_does_not_deadlock() {
    let harness = make_default_harness();
    provision_all(&harness.manager, &["multi-a", "multi-b", "multi-c"]).await;

    let report = harness
        .manager
        .teardown_all_blocking()
        .expect("blocking teardown");

    assert_eq!(report.cleaned_count(), 3);
    assert!(harness.manager.is_empty().await);
}

#[test]
fn blocking_teardown_reports_failures_like_the_async_form() {
    let harness = make_default_harness();
    provision_on_scratch_runtime(&harness, &["ok", "stuck"]);
    harness.broker.fail_deletes_of("stuck", "lock held by another client");

    let error = harness
        .manager
        .teardown_all_blocking()
        .expect_err("failure must surface");

    let LifecycleError::TeardownIncomplete { report, failures } = error else {
        panic!("expected an incomplete teardown");
    };
    assert_eq!(report.deleted, vec!["ok".to_string()]);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].address(), "stuck");
}

#[test]
fn delete_entity_blocking_handles_present_and_missing_entities() {
    integration_test_utils::init_logging();
    let broker = Arc::new(InMemoryBroker::new());
    broker.create_queue("audit");

    let deleted = delete_entity_blocking(broker.clone(), EntityKind::Queue, "audit")
        .expect("delete existing queue");
    let missing = delete_entity_blocking(broker.clone(), EntityKind::Queue, "audit")
        .expect("delete missing queue");

    assert_eq!(deleted, DeleteOutcome::Deleted);
    assert_eq!(missing, DeleteOutcome::AlreadyAbsent);
    assert_eq!(
        broker.queue_delete_calls(),
        vec!["audit".to_string(), "audit".to_string()]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_entity_blocking_propagates_remote_failures() {
    let broker = Arc::new(InMemoryBroker::new());
    broker.create_topic("billing");
    broker.fail_deletes_of("billing", "quota exceeded");

    let error = delete_entity_blocking(broker.clone(), EntityKind::Topic, "billing")
        .expect_err("remote failure must surface");

    assert!(matches!(error, LifecycleError::Remote(ref err) if !err.is_not_found()));
    assert!(broker.has_topic("billing"));
}
