/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
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

//! Administrative broker operations and idempotent entity deletion.

use crate::lifecycle::error::LifecycleError;
use crate::observability::{events, fields};
use crate::runtime::blocking_bridge;
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const COMPONENT: &str = "entity_management";

/// Kind of broker entity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntityKind {
    Queue,
    Topic,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Queue => write!(f, "queue"),
            EntityKind::Topic => write!(f, "topic"),
        }
    }
}

/// Failures reported by a [`ManagementClient`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ManagementError {
    /// The entity does not exist on the broker.
    #[error("messaging entity '{name}' was not found")]
    EntityNotFound { name: String },

    #[error("management operation on '{name}' failed: {message}")]
    Remote { name: String, message: String },
}

impl ManagementError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManagementError::EntityNotFound { .. })
    }
}

/// Result of an idempotent delete.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

/// Administrative client for broker entities.
#[async_trait]
pub trait ManagementClient: Send + Sync {
    async fn delete_queue(&self, name: &str) -> Result<(), ManagementError>;

    async fn delete_topic(&self, name: &str) -> Result<(), ManagementError>;
}

/// Deletes the entity `name`, treating "not found" as success.
///
/// Every other failure is returned unchanged.
pub async fn delete_entity(
    management_client: &dyn ManagementClient,
    kind: EntityKind,
    name: &str,
) -> Result<DeleteOutcome, ManagementError> {
    debug!(
        event = events::ENTITY_DELETE_START,
        component = COMPONENT,
        entity_kind = %kind,
        entity_name = name,
        "deleting entity"
    );

    let deleted = match kind {
        EntityKind::Queue => management_client.delete_queue(name).await,
        EntityKind::Topic => management_client.delete_topic(name).await,
    };

    match deleted {
        Ok(()) => {
            info!(
                event = events::ENTITY_DELETE_OK,
                component = COMPONENT,
                entity_kind = %kind,
                entity_name = name,
                "deleted entity"
            );
            Ok(DeleteOutcome::Deleted)
        }
        Err(err) if err.is_not_found() => {
            info!(
                event = events::ENTITY_DELETE_ABSENT,
                component = COMPONENT,
                entity_kind = %kind,
                entity_name = name,
                "entity was already absent"
            );
            Ok(DeleteOutcome::AlreadyAbsent)
        }
        Err(err) => {
            warn!(
                event = events::ENTITY_DELETE_FAILED,
                component = COMPONENT,
                entity_kind = %kind,
                entity_name = name,
                err = %err,
                "unable to delete entity"
            );
            Err(err)
        }
    }
}

/// Blocking form of [`delete_entity`] for callers without an async context.
///
/// Runs on the [`blocking_bridge`]; see its documentation for the constraints on
/// `management_client`.
pub fn delete_entity_blocking(
    management_client: Arc<dyn ManagementClient>,
    kind: EntityKind,
    name: &str,
) -> Result<DeleteOutcome, LifecycleError> {
    let name = name.to_string();
    let caller_thread = fields::current_thread_name_or_default();
    debug!(
        event = events::ENTITY_DELETE_START,
        component = COMPONENT,
        entity_kind = %kind,
        entity_name = %name,
        caller_thread = %caller_thread,
        "bridging blocking delete"
    );

    let outcome = blocking_bridge::block_on(async move {
        delete_entity(management_client.as_ref(), kind, &name).await
    })??;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::{
        delete_entity, delete_entity_blocking, DeleteOutcome, EntityKind, ManagementClient,
        ManagementError,
    };
    use crate::lifecycle::error::LifecycleError;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex as StdMutex};

    #[derive(Default)]
    struct FakeManagementClient {
        queues: StdMutex<HashSet<String>>,
        topics: StdMutex<HashSet<String>>,
        unavailable: bool,
    }

    impl FakeManagementClient {
        fn with_queue(name: &str) -> Self {
            let client = Self::default();
            client
                .queues
                .lock()
                .expect("lock queues")
                .insert(name.to_string());
            client
        }

        fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Default::default()
            }
        }
    }

    fn remove(entities: &StdMutex<HashSet<String>>, name: &str) -> Result<(), ManagementError> {
        if entities.lock().expect("lock entities").remove(name) {
            Ok(())
        } else {
            Err(ManagementError::EntityNotFound {
                name: name.to_string(),
            })
        }
    }

    #[async_trait]
    impl ManagementClient for FakeManagementClient {
        async fn delete_queue(&self, name: &str) -> Result<(), ManagementError> {
            if self.unavailable {
                return Err(ManagementError::Remote {
                    name: name.to_string(),
                    message: "service unavailable".to_string(),
                });
            }
            remove(&self.queues, name)
        }

        async fn delete_topic(&self, name: &str) -> Result<(), ManagementError> {
            remove(&self.topics, name)
        }
    }

    #[tokio::test]
    async fn delete_entity_reports_deleted_when_present() {
        let client = FakeManagementClient::with_queue("orders");

        let outcome = delete_entity(&client, EntityKind::Queue, "orders")
            .await
            .expect("delete should succeed");

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(client.queues.lock().expect("lock queues").is_empty());
    }

    #[tokio::test]
    async fn delete_entity_treats_not_found_as_success() {
        let client = FakeManagementClient::default();

        let queue_outcome = delete_entity(&client, EntityKind::Queue, "nonexistent")
            .await
            .expect("missing queue is not an error");
        let topic_outcome = delete_entity(&client, EntityKind::Topic, "nonexistent")
            .await
            .expect("missing topic is not an error");

        assert_eq!(queue_outcome, DeleteOutcome::AlreadyAbsent);
        assert_eq!(topic_outcome, DeleteOutcome::AlreadyAbsent);
    }

    #[tokio::test]
    async fn delete_entity_propagates_other_failures_unchanged() {
        let client = FakeManagementClient::unavailable();

        let error = delete_entity(&client, EntityKind::Queue, "orders")
            .await
            .expect_err("remote failure must surface");

        assert_eq!(
            error,
            ManagementError::Remote {
                name: "orders".to_string(),
                message: "service unavailable".to_string(),
            }
        );
    }

    #[test]
    fn delete_entity_blocking_from_plain_thread() {
        let client: Arc<dyn ManagementClient> = Arc::new(FakeManagementClient::default());

        let outcome = delete_entity_blocking(client, EntityKind::Topic, "nonexistent")
            .expect("missing topic is not an error");

        assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_entity_blocking_inside_runtime_keeps_remote_errors() {
        let client: Arc<dyn ManagementClient> = Arc::new(FakeManagementClient::unavailable());

        let error = delete_entity_blocking(client, EntityKind::Queue, "orders")
            .expect_err("remote failure must surface");

        assert!(matches!(
            error,
            LifecycleError::Remote(ManagementError::Remote { .. })
        ));
    }
}
