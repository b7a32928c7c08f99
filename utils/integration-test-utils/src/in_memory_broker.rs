/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use async_trait::async_trait;
use servicebus_entities::{ManagementClient, ManagementError};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct BrokerState {
    queues: BTreeSet<String>,
    topics: BTreeSet<String>,
    failing_deletes: HashMap<String, String>,
    queue_delete_calls: Vec<String>,
    topic_delete_calls: Vec<String>,
}

/// Broker namespace held in memory.
///
/// Queues are created by [`RecordingTransport`](crate::RecordingTransport) on
/// initialize and removed through the [`ManagementClient`] implementation, which answers
/// `EntityNotFound` for anything missing.
#[derive(Default)]
pub struct InMemoryBroker {
    state: Mutex<BrokerState>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BrokerState> {
        self.state.lock().expect("broker state lock poisoned")
    }

    pub fn create_queue(&self, name: &str) {
        self.state().queues.insert(name.to_string());
    }

    pub fn create_topic(&self, name: &str) {
        self.state().topics.insert(name.to_string());
    }

    /// Removes a queue behind the manager's back, like an operator would.
    pub fn remove_queue_externally(&self, name: &str) {
        self.state().queues.remove(name);
    }

    pub fn has_queue(&self, name: &str) -> bool {
        self.state().queues.contains(name)
    }

    pub fn has_topic(&self, name: &str) -> bool {
        self.state().topics.contains(name)
    }

    pub fn queues(&self) -> Vec<String> {
        self.state().queues.iter().cloned().collect()
    }

    /// Every delete of `name` (queue or topic) fails with `message` until cleared.
    pub fn fail_deletes_of(&self, name: &str, message: &str) {
        self.state()
            .failing_deletes
            .insert(name.to_string(), message.to_string());
    }

    pub fn clear_failures(&self) {
        self.state().failing_deletes.clear();
    }

    pub fn queue_delete_calls(&self) -> Vec<String> {
        self.state().queue_delete_calls.clone()
    }

    pub fn topic_delete_calls(&self) -> Vec<String> {
        self.state().topic_delete_calls.clone()
    }
}

fn remove_entity(
    entities: &mut BTreeSet<String>,
    failing_deletes: &HashMap<String, String>,
    name: &str,
) -> Result<(), ManagementError> {
    if let Some(message) = failing_deletes.get(name) {
        return Err(ManagementError::Remote {
            name: name.to_string(),
            message: message.clone(),
        });
    }
    if entities.remove(name) {
        Ok(())
    } else {
        Err(ManagementError::EntityNotFound {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl ManagementClient for InMemoryBroker {
    async fn delete_queue(&self, name: &str) -> Result<(), ManagementError> {
        debug!("in-memory broker: deleting queue {name}");
        let mut state = self.state();
        state.queue_delete_calls.push(name.to_string());
        let BrokerState {
            queues,
            failing_deletes,
            ..
        } = &mut *state;
        remove_entity(queues, failing_deletes, name)
    }

    async fn delete_topic(&self, name: &str) -> Result<(), ManagementError> {
        debug!("in-memory broker: deleting topic {name}");
        let mut state = self.state();
        state.topic_delete_calls.push(name.to_string());
        let BrokerState {
            topics,
            failing_deletes,
            ..
        } = &mut *state;
        remove_entity(topics, failing_deletes, name)
    }
}
