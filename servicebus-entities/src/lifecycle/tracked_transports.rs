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

//! Registry of provisioned transports keyed by input queue address.

use crate::lifecycle::transport::Transport;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Provisioning slot for one address.
///
/// Concurrent requests for the same address share the slot, so only one of them runs
/// the purge + initialize sequence.
pub(crate) type ProvisioningSlot = Arc<OnceCell<Arc<dyn Transport>>>;

/// A provisioned transport owed a teardown.
pub(crate) type TrackedTransport = (String, Arc<dyn Transport>);

#[derive(Default)]
struct TrackedState {
    slots: HashMap<String, ProvisioningSlot>,
    // Addresses in provisioning order; each appears once per provisioned slot.
    provisioned: Vec<String>,
}

pub(crate) struct TrackedTransports {
    state: Mutex<TrackedState>,
}

impl TrackedTransports {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(TrackedState::default()),
        }
    }

    /// Returns the slot for `address`, inserting an empty one when absent.
    pub(crate) async fn slot(&self, address: &str) -> ProvisioningSlot {
        let mut state = self.state.lock().await;
        state
            .slots
            .entry(address.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Records that the slot for `address` now holds a provisioned transport.
    pub(crate) async fn record_provisioned(&self, address: &str) {
        self.state
            .lock()
            .await
            .provisioned
            .push(address.to_string());
    }

    /// Drops the slot for `address` if it is still `slot`, empty and held by no other
    /// request.
    pub(crate) async fn discard_if_empty(&self, address: &str, slot: &ProvisioningSlot) {
        let mut state = self.state.lock().await;
        let Some(current) = state.slots.get(address) else {
            return;
        };
        // The map and the caller hold the only references.
        if Arc::ptr_eq(current, slot) && slot.get().is_none() && Arc::strong_count(slot) == 2 {
            state.slots.remove(address);
        }
    }

    /// Removes every provisioned transport, in provisioning order.
    ///
    /// Empty slots nobody is provisioning are dropped; in-flight ones are left in place.
    pub(crate) async fn drain(&self) -> Vec<TrackedTransport> {
        let mut state = self.state.lock().await;
        let provisioned = std::mem::take(&mut state.provisioned);

        let mut drained = Vec::with_capacity(provisioned.len());
        for address in provisioned {
            let Some(slot) = state.slots.remove(&address) else {
                continue;
            };
            if let Some(transport) = slot.get() {
                drained.push((address, transport.clone()));
            }
        }

        state
            .slots
            .retain(|_, slot| slot.get().is_some() || Arc::strong_count(slot) > 1);
        drained
    }

    /// Puts drained transports back under tracking, ahead of anything provisioned since.
    ///
    /// An address re-provisioned in the meantime keeps its newer transport.
    pub(crate) async fn restore(&self, transports: Vec<TrackedTransport>) {
        let mut state = self.state.lock().await;
        let mut restored = Vec::with_capacity(transports.len());

        for (address, transport) in transports {
            if state.slots.contains_key(&address) {
                continue;
            }
            state.slots.insert(
                address.clone(),
                Arc::new(OnceCell::new_with(Some(transport))),
            );
            restored.push(address);
        }

        restored.append(&mut state.provisioned);
        state.provisioned = restored;
    }

    pub(crate) async fn addresses(&self) -> Vec<String> {
        self.state.lock().await.provisioned.clone()
    }

    pub(crate) async fn len(&self) -> usize {
        self.state.lock().await.provisioned.len()
    }

    #[cfg(test)]
    pub(crate) async fn slot_count(&self) -> usize {
        self.state.lock().await.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::TrackedTransports;
    use crate::lifecycle::transport::{Transport, TransportError};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopTransport;

    #[async_trait]
    impl Transport for NoopTransport {
        fn input_queue_address(&self) -> Option<&str> {
            None
        }

        async fn initialize(&self) -> Result<(), TransportError> {
            Ok(())
        }

        async fn purge_input_queue(&self) -> Result<(), TransportError> {
            Ok(())
        }

        async fn dispose(&self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    async fn provision(tracked: &TrackedTransports, address: &str) -> Arc<dyn Transport> {
        let slot = tracked.slot(address).await;
        let transport: Arc<dyn Transport> = Arc::new(NoopTransport);
        assert!(slot.set(transport.clone()).is_ok(), "slot should be empty");
        tracked.record_provisioned(address).await;
        transport
    }

    #[tokio::test]
    async fn slot_is_shared_per_address() {
        let tracked = TrackedTransports::new();

        let first = tracked.slot("orders").await;
        let second = tracked.slot("orders").await;
        let other = tracked.slot("billing").await;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[tokio::test]
    async fn drain_returns_provisioned_in_order_and_skips_empty_slots() {
        let tracked = TrackedTransports::new();

        provision(&tracked, "b").await;
        let _empty = tracked.slot("pending").await;
        provision(&tracked, "a").await;

        let drained = tracked.drain().await;
        let addresses: Vec<_> = drained.iter().map(|(address, _)| address.as_str()).collect();

        assert_eq!(addresses, vec!["b", "a"]);
        assert!(tracked.addresses().await.is_empty());
        assert!(tracked.slot("pending").await.get().is_none());
        assert!(tracked.slot("a").await.get().is_none());
    }

    #[tokio::test]
    async fn discard_if_empty_drops_only_unshared_empty_slots() {
        let tracked = TrackedTransports::new();

        let failed = tracked.slot("failed").await;
        tracked.discard_if_empty("failed", &failed).await;
        assert_eq!(tracked.slot_count().await, 0);

        let contended = tracked.slot("contended").await;
        let waiter = tracked.slot("contended").await;
        tracked.discard_if_empty("contended", &contended).await;
        assert_eq!(tracked.slot_count().await, 1);
        drop(waiter);

        provision(&tracked, "ready").await;
        let ready = tracked.slot("ready").await;
        tracked.discard_if_empty("ready", &ready).await;
        assert_eq!(tracked.addresses().await, vec!["ready".to_string()]);
        assert_eq!(tracked.slot_count().await, 2);
    }

    #[tokio::test]
    async fn drain_drops_abandoned_empty_slots_but_keeps_in_flight_ones() {
        let tracked = TrackedTransports::new();
        provision(&tracked, "a").await;
        drop(tracked.slot("abandoned").await);
        let in_flight = tracked.slot("in-flight").await;

        tracked.drain().await;

        assert_eq!(tracked.slot_count().await, 1);
        assert!(Arc::ptr_eq(&tracked.slot("in-flight").await, &in_flight));
    }

    #[tokio::test]
    async fn restore_puts_transports_back_ahead_of_newer_ones() {
        let tracked = TrackedTransports::new();
        let original = provision(&tracked, "a").await;
        let drained = tracked.drain().await;

        provision(&tracked, "c").await;
        tracked.restore(drained).await;

        assert_eq!(
            tracked.addresses().await,
            vec!["a".to_string(), "c".to_string()]
        );
        let restored = tracked
            .slot("a")
            .await
            .get()
            .cloned()
            .expect("restored transport");
        assert!(Arc::ptr_eq(&restored, &original));
    }
}
