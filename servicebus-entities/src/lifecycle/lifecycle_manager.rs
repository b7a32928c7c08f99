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

//! Create-or-reuse provisioning and teardown of broker transports.

use crate::config::LifecycleConfig;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::management::{self, DeleteOutcome, EntityKind, ManagementClient};
use crate::lifecycle::teardown::{TeardownFailure, TeardownPolicy, TeardownReport};
use crate::lifecycle::tracked_transports::{TrackedTransport, TrackedTransports};
use crate::lifecycle::transport::{
    Transport, TransportBuilder, TransportError, TransportSettings, TransportStage,
};
use crate::naming::name_helper::TopicNameConvention;
use crate::observability::{events, fields};
use crate::runtime::blocking_bridge;
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "lifecycle_manager";

/// Provisions transports by input queue address and deletes everything it provisioned
/// on teardown.
///
/// At most one transport exists per address between teardowns, and its purge +
/// initialize sequence runs exactly once even under concurrent requests. Requests for
/// different addresses provision concurrently.
///
/// [`teardown_all`](Self::teardown_all) must not race with provisioning of the same
/// addresses.
pub struct TransportLifecycleManager {
    connection_string: String,
    naming: Arc<dyn TopicNameConvention>,
    transport_builder: Arc<dyn TransportBuilder>,
    management_client: Arc<dyn ManagementClient>,
    teardown_policy: TeardownPolicy,
    tracked: TrackedTransports,
}

impl TransportLifecycleManager {
    pub fn new(
        connection_string: &str,
        naming: Arc<dyn TopicNameConvention>,
        transport_builder: Arc<dyn TransportBuilder>,
        management_client: Arc<dyn ManagementClient>,
    ) -> Self {
        Self {
            connection_string: connection_string.to_string(),
            naming,
            transport_builder,
            management_client,
            teardown_policy: TeardownPolicy::default(),
            tracked: TrackedTransports::new(),
        }
    }

    pub fn from_config(
        config: &LifecycleConfig,
        transport_builder: Arc<dyn TransportBuilder>,
        management_client: Arc<dyn ManagementClient>,
    ) -> Self {
        Self::new(
            &config.connection_string,
            Arc::new(config.name_helper()),
            transport_builder,
            management_client,
        )
        .with_teardown_policy(config.teardown_policy)
    }

    pub fn with_teardown_policy(mut self, teardown_policy: TeardownPolicy) -> Self {
        self.teardown_policy = teardown_policy;
        self
    }

    pub fn naming(&self) -> &Arc<dyn TopicNameConvention> {
        &self.naming
    }

    pub fn teardown_policy(&self) -> TeardownPolicy {
        self.teardown_policy
    }

    fn settings(&self, input_queue_address: Option<&str>) -> TransportSettings {
        TransportSettings {
            connection_string: self.connection_string.clone(),
            input_queue_address: input_queue_address.map(str::to_string),
            naming: self.naming.clone(),
        }
    }

    fn build(&self, input_queue_address: Option<&str>) -> Result<Arc<dyn Transport>, LifecycleError> {
        self.transport_builder
            .build(&self.settings(input_queue_address))
            .map_err(|source| {
                let address = fields::format_address(input_queue_address);
                warn!(
                    event = events::TRANSPORT_BUILD_FAILED,
                    component = COMPONENT,
                    address = %address,
                    err = %source,
                    "unable to build transport"
                );
                LifecycleError::Transport {
                    address,
                    stage: TransportStage::Build,
                    source,
                }
            })
    }

    async fn dispose(transport: &Arc<dyn Transport>, address: &str) -> Result<(), TransportError> {
        match transport.dispose().await {
            Ok(()) => {
                debug!(
                    event = events::TRANSPORT_DISPOSE_OK,
                    component = COMPONENT,
                    address,
                    "disposed transport"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::TRANSPORT_DISPOSE_FAILED,
                    component = COMPONENT,
                    address,
                    err = %err,
                    "unable to dispose transport"
                );
                Err(err)
            }
        }
    }

    /// Disposes a transport whose provisioning failed and returns the provisioning error.
    async fn rollback(
        transport: &Arc<dyn Transport>,
        address: &str,
        stage: TransportStage,
        source: TransportError,
    ) -> LifecycleError {
        let event = match stage {
            TransportStage::Purge => events::TRANSPORT_PURGE_FAILED,
            _ => events::TRANSPORT_INITIALIZE_FAILED,
        };
        warn!(
            event,
            component = COMPONENT,
            address,
            err = %source,
            reason = fields::REASON_ROLLBACK_AFTER_PROVISION_FAILURE,
            "unable to {stage} transport"
        );

        // The provisioning error is what the caller needs; a dispose failure is only logged.
        let _ = Self::dispose(transport, address).await;

        LifecycleError::Transport {
            address: address.to_string(),
            stage,
            source,
        }
    }

    /// Builds and initializes a send-only transport.
    ///
    /// One-way transports have no input queue, so they are never purged and never
    /// tracked; the caller owns their disposal.
    pub async fn create_one_way(&self) -> Result<Arc<dyn Transport>, LifecycleError> {
        let transport = self.build(None)?;

        if let Err(source) = transport.initialize().await {
            return Err(
                Self::rollback(&transport, fields::NONE, TransportStage::Initialize, source).await,
            );
        }

        info!(
            event = events::TRANSPORT_ONE_WAY_CREATE,
            component = COMPONENT,
            address = fields::NONE,
            "created one-way transport"
        );
        Ok(transport)
    }

    /// Returns the transport for `address`, provisioning it on first request.
    ///
    /// `address` is validated before anything touches the broker. A new transport is
    /// purged (stale messages from earlier runs must not leak) and then initialized. On
    /// failure nothing is tracked and a later call starts over.
    pub async fn get_or_create(&self, address: &str) -> Result<Arc<dyn Transport>, LifecycleError> {
        if let Err(err) = self.naming.validate_queue_name(address) {
            warn!(
                event = events::ADDRESS_REJECTED,
                component = COMPONENT,
                address,
                err = %err,
                "rejected input queue address"
            );
            return Err(err.into());
        }

        let slot = self.tracked.slot(address).await;
        if let Some(transport) = slot.get() {
            debug!(
                event = events::TRANSPORT_REUSE,
                component = COMPONENT,
                address,
                "reusing provisioned transport"
            );
            return Ok(transport.clone());
        }

        let mut provisioned_here = false;
        let provisioned_flag = &mut provisioned_here;
        let provisioned = slot
            .get_or_try_init(|| async move {
                *provisioned_flag = true;
                self.provision(address).await
            })
            .await;
        let transport = match provisioned {
            Ok(transport) => transport.clone(),
            Err(err) => {
                self.tracked.discard_if_empty(address, &slot).await;
                return Err(err);
            }
        };

        if provisioned_here {
            self.tracked.record_provisioned(address).await;
        } else {
            debug!(
                event = events::TRANSPORT_REUSE,
                component = COMPONENT,
                address,
                "reusing transport provisioned by a concurrent request"
            );
        }
        Ok(transport)
    }

    async fn provision(&self, address: &str) -> Result<Arc<dyn Transport>, LifecycleError> {
        let transport = self.build(Some(address))?;

        if let Err(source) = transport.purge_input_queue().await {
            return Err(Self::rollback(&transport, address, TransportStage::Purge, source).await);
        }
        debug!(
            event = events::TRANSPORT_PURGE_OK,
            component = COMPONENT,
            address,
            "purged input queue"
        );

        if let Err(source) = transport.initialize().await {
            return Err(
                Self::rollback(&transport, address, TransportStage::Initialize, source).await,
            );
        }
        info!(
            event = events::TRANSPORT_INITIALIZE_OK,
            component = COMPONENT,
            address,
            "provisioned transport"
        );

        Ok(transport)
    }

    /// Deletes the entity `name`, treating "not found" as success.
    ///
    /// Works on any entity, tracked or not.
    pub async fn delete_entity(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<DeleteOutcome, LifecycleError> {
        Ok(management::delete_entity(self.management_client.as_ref(), kind, name).await?)
    }

    /// Deletes the queue of every tracked transport, then disposes the transport.
    ///
    /// Queues already removed remotely count as cleaned. Other failures follow the
    /// configured [`TeardownPolicy`]. Addresses cleaned here may be requested again
    /// afterwards and get fresh transports.
    pub async fn teardown_all(&self) -> Result<TeardownReport, LifecycleError> {
        let tracked = self.tracked.drain().await;
        info!(
            event = events::TEARDOWN_START,
            component = COMPONENT,
            tracked = tracked.len(),
            policy = %self.teardown_policy,
            "tearing down tracked transports"
        );

        let mut report = TeardownReport::default();
        let mut failures = Vec::new();
        let mut remaining = tracked.into_iter();

        while let Some((address, transport)) = remaining.next() {
            match management::delete_entity(
                self.management_client.as_ref(),
                EntityKind::Queue,
                &address,
            )
            .await
            {
                Ok(outcome) => report.record(&address, outcome),
                Err(source) => {
                    let failure = TeardownFailure::Delete {
                        address: address.clone(),
                        source,
                    };
                    if self.teardown_policy == TeardownPolicy::FailFast {
                        let mut untouched: Vec<TrackedTransport> = vec![(address, transport)];
                        untouched.extend(remaining);
                        return Err(self.abort_teardown(report, failure, untouched).await);
                    }
                    failures.push(failure);
                }
            }

            if let Err(source) = Self::dispose(&transport, &address).await {
                let failure = TeardownFailure::Dispose { address, source };
                if self.teardown_policy == TeardownPolicy::FailFast {
                    return Err(self.abort_teardown(report, failure, remaining.collect()).await);
                }
                failures.push(failure);
            }
        }

        if failures.is_empty() {
            info!(
                event = events::TEARDOWN_OK,
                component = COMPONENT,
                deleted = report.deleted.len(),
                already_absent = report.already_absent.len(),
                "teardown complete"
            );
            return Ok(report);
        }

        warn!(
            event = events::TEARDOWN_INCOMPLETE,
            component = COMPONENT,
            deleted = report.deleted.len(),
            already_absent = report.already_absent.len(),
            failed = failures.len(),
            "teardown left resources behind"
        );
        Err(LifecycleError::TeardownIncomplete { report, failures })
    }

    async fn abort_teardown(
        &self,
        report: TeardownReport,
        failure: TeardownFailure,
        untouched: Vec<TrackedTransport>,
    ) -> LifecycleError {
        warn!(
            event = events::TEARDOWN_ABORTED,
            component = COMPONENT,
            address = failure.address(),
            tracked = untouched.len(),
            err = %failure,
            "aborting teardown"
        );
        self.tracked.restore(untouched).await;
        LifecycleError::TeardownAborted { report, failure }
    }

    /// Blocking form of [`teardown_all`](Self::teardown_all) for synchronous teardown hooks.
    ///
    /// Runs on the [`blocking_bridge`]; the transports and management client must not
    /// depend on the calling thread's runtime.
    pub fn teardown_all_blocking(self: &Arc<Self>) -> Result<TeardownReport, LifecycleError> {
        let manager = Arc::clone(self);
        blocking_bridge::block_on(async move { manager.teardown_all().await })?
    }

    /// Addresses currently owed a teardown, in provisioning order.
    pub async fn tracked_addresses(&self) -> Vec<String> {
        self.tracked.addresses().await
    }

    pub async fn len(&self) -> usize {
        self.tracked.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
