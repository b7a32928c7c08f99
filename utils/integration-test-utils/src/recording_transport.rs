use crate::InMemoryBroker;
use async_trait::async_trait;
use servicebus_entities::{Transport, TransportBuilder, TransportError, TransportSettings};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Counter key used for transports built without an input queue.
pub const ONE_WAY_KEY: &str = "<one-way>";

/// Calls observed for one address.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TransportCallCounts {
    pub builds: usize,
    pub purges: usize,
    pub initializations: usize,
    pub disposals: usize,
}

type CallLog = Arc<Mutex<HashMap<String, TransportCallCounts>>>;

fn record(log: &CallLog, key: &str, update: impl FnOnce(&mut TransportCallCounts)) {
    let mut log = log.lock().expect("call log lock poisoned");
    update(log.entry(key.to_string()).or_default());
}

/// Transport that records its calls and provisions its queue in an [`InMemoryBroker`].
pub struct RecordingTransport {
    input_queue_address: Option<String>,
    broker: Arc<InMemoryBroker>,
    log: CallLog,
    initialize_delay: Option<Duration>,
    fail_purge: bool,
    fail_initialize: bool,
    fail_dispose: bool,
}

impl RecordingTransport {
    fn key(&self) -> &str {
        self.input_queue_address.as_deref().unwrap_or(ONE_WAY_KEY)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn input_queue_address(&self) -> Option<&str> {
        self.input_queue_address.as_deref()
    }

    async fn initialize(&self) -> Result<(), TransportError> {
        if let Some(delay) = self.initialize_delay {
            tokio::time::sleep(delay).await;
        }
        record(&self.log, self.key(), |counts| counts.initializations += 1);

        if self.fail_initialize {
            return Err(TransportError::new(format!(
                "initialize of {} rejected",
                self.key()
            )));
        }
        if let Some(address) = &self.input_queue_address {
            self.broker.create_queue(address);
        }
        debug!("{}: initialized", self.key());
        Ok(())
    }

    async fn purge_input_queue(&self) -> Result<(), TransportError> {
        record(&self.log, self.key(), |counts| counts.purges += 1);
        if self.fail_purge {
            return Err(TransportError::new(format!(
                "purge of {} rejected",
                self.key()
            )));
        }
        Ok(())
    }

    async fn dispose(&self) -> Result<(), TransportError> {
        record(&self.log, self.key(), |counts| counts.disposals += 1);
        if self.fail_dispose {
            return Err(TransportError::new(format!(
                "dispose of {} rejected",
                self.key()
            )));
        }
        Ok(())
    }
}

/// Builds [`RecordingTransport`]s and keeps their per-address call counts.
pub struct RecordingTransportBuilder {
    broker: Arc<InMemoryBroker>,
    log: CallLog,
    initialize_delay: Option<Duration>,
    failing_purge: HashSet<String>,
    failing_initialize: HashSet<String>,
    failing_dispose: HashSet<String>,
}

impl RecordingTransportBuilder {
    pub fn new(broker: Arc<InMemoryBroker>) -> Self {
        Self {
            broker,
            log: Arc::default(),
            initialize_delay: None,
            failing_purge: HashSet::new(),
            failing_initialize: HashSet::new(),
            failing_dispose: HashSet::new(),
        }
    }

    /// Slows every initialize down, widening races between concurrent requests.
    pub fn with_initialize_delay(mut self, delay: Duration) -> Self {
        self.initialize_delay = Some(delay);
        self
    }

    pub fn fail_purge_for(mut self, address: &str) -> Self {
        self.failing_purge.insert(address.to_string());
        self
    }

    pub fn fail_initialize_for(mut self, address: &str) -> Self {
        self.failing_initialize.insert(address.to_string());
        self
    }

    pub fn fail_dispose_for(mut self, address: &str) -> Self {
        self.failing_dispose.insert(address.to_string());
        self
    }

    pub fn counts(&self, address: &str) -> TransportCallCounts {
        self.log
            .lock()
            .expect("call log lock poisoned")
            .get(address)
            .copied()
            .unwrap_or_default()
    }
}

impl TransportBuilder for RecordingTransportBuilder {
    fn build(&self, settings: &TransportSettings) -> Result<Arc<dyn Transport>, TransportError> {
        let key = settings
            .input_queue_address
            .as_deref()
            .unwrap_or(ONE_WAY_KEY);
        record(&self.log, key, |counts| counts.builds += 1);

        Ok(Arc::new(RecordingTransport {
            input_queue_address: settings.input_queue_address.clone(),
            broker: self.broker.clone(),
            log: self.log.clone(),
            initialize_delay: self.initialize_delay,
            fail_purge: self.failing_purge.contains(key),
            fail_initialize: self.failing_initialize.contains(key),
            fail_dispose: self.failing_dispose.contains(key),
        }))
    }
}
