use integration_test_utils::{InMemoryBroker, RecordingTransportBuilder};
use servicebus_entities::{EntityNameHelper, TeardownPolicy, TransportLifecycleManager};
use std::sync::Arc;

pub(crate) const CONNECTION_STRING: &str =
    "Endpoint=sb://integration.servicebus.windows.net/;SharedAccessKeyName=test";

pub(crate) struct Harness {
    pub(crate) broker: Arc<InMemoryBroker>,
    pub(crate) builder: Arc<RecordingTransportBuilder>,
    pub(crate) manager: Arc<TransportLifecycleManager>,
}

#[allow(dead_code)]
pub(crate) fn make_harness(
    configure: impl FnOnce(RecordingTransportBuilder) -> RecordingTransportBuilder,
    teardown_policy: TeardownPolicy,
) -> Harness {
    integration_test_utils::init_logging();

    let broker = Arc::new(InMemoryBroker::new());
    let builder = Arc::new(configure(RecordingTransportBuilder::new(broker.clone())));
    let manager = Arc::new(
        TransportLifecycleManager::new(
            CONNECTION_STRING,
            Arc::new(EntityNameHelper::default()),
            builder.clone(),
            broker.clone(),
        )
        .with_teardown_policy(teardown_policy),
    );

    Harness {
        broker,
        builder,
        manager,
    }
}

pub(crate) fn make_default_harness() -> Harness {
    make_harness(|builder| builder, TeardownPolicy::ContinueAndReport)
}

#[allow(dead_code)]
pub(crate) async fn provision_all(manager: &TransportLifecycleManager, addresses: &[&str]) {
    for address in addresses {
        assert!(
            manager.get_or_create(address).await.is_ok(),
            "provisioning {address} should succeed"
        );
    }
}
