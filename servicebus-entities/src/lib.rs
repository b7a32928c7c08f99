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

//! # servicebus-entities
//!
//! `servicebus-entities` resolves message types to Service Bus entity names and manages
//! the lifecycle of the queues and transports a test harness provisions against a
//! broker namespace.
//!
//! Two conventions are supported: the modern one, which keeps periods, hyphens and
//! case, and the legacy one, which lowercases names and allows only `_` besides
//! alphanumerics and the `/` segment separator.
//!
//! ## Provision and tear down
//!
//! ```
//! use std::sync::Arc;
//! use servicebus_entities::{EntityNameHelper, TransportLifecycleManager};
//!
//! # pub mod mock_broker {
//! #     use std::sync::Arc;
//! #     use async_trait::async_trait;
//! #     use servicebus_entities::{
//! #         ManagementClient, ManagementError, Transport, TransportBuilder, TransportError,
//! #         TransportSettings,
//! #     };
//! #
//! #     pub struct MockTransport(pub Option<String>);
//! #
//! #     #[async_trait]
//! #     impl Transport for MockTransport {
//! #         fn input_queue_address(&self) -> Option<&str> { self.0.as_deref() }
//! #         async fn initialize(&self) -> Result<(), TransportError> { Ok(()) }
//! #         async fn purge_input_queue(&self) -> Result<(), TransportError> { Ok(()) }
//! #         async fn dispose(&self) -> Result<(), TransportError> { Ok(()) }
//! #     }
//! #
//! #     pub struct MockBuilder;
//! #
//! #     impl TransportBuilder for MockBuilder {
//! #         fn build(
//! #             &self,
//! #             settings: &TransportSettings,
//! #         ) -> Result<Arc<dyn Transport>, TransportError> {
//! #             Ok(Arc::new(MockTransport(settings.input_queue_address.clone())))
//! #         }
//! #     }
//! #
//! #     pub struct MockManagement;
//! #
//! #     #[async_trait]
//! #     impl ManagementClient for MockManagement {
//! #         async fn delete_queue(&self, _name: &str) -> Result<(), ManagementError> { Ok(()) }
//! #         async fn delete_topic(&self, _name: &str) -> Result<(), ManagementError> { Ok(()) }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let manager = TransportLifecycleManager::new(
//!     "Endpoint=sb://example.servicebus.windows.net/",
//!     Arc::new(EntityNameHelper::default()),
//!     Arc::new(mock_broker::MockBuilder),
//!     Arc::new(mock_broker::MockManagement),
//! );
//!
//! let first = manager.get_or_create("orders").await.unwrap();
//! let second = manager.get_or_create("orders").await.unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! let report = manager.teardown_all().await.unwrap();
//! assert_eq!(report.deleted, vec!["orders".to_string()]);
//! assert!(manager.is_empty().await);
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Naming: pure name resolution and validation, no I/O
//! - Lifecycle: create-or-reuse provisioning, idempotent deletion and teardown
//! - Runtime: the single blocking bridge for synchronous callers
//! - Config: JSON5 settings for the manager and per-run entity names
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber. Test
//! harnesses and binaries are responsible for one-time `tracing_subscriber`
//! initialization.

mod config;
pub use config::{ConfigError, LifecycleConfig};

mod lifecycle;
pub use lifecycle::error::LifecycleError;
pub use lifecycle::lifecycle_manager::TransportLifecycleManager;
pub use lifecycle::management::{
    delete_entity, delete_entity_blocking, DeleteOutcome, EntityKind, ManagementClient,
    ManagementError,
};
pub use lifecycle::teardown::{TeardownFailure, TeardownPolicy, TeardownReport};
pub use lifecycle::transport::{
    Transport, TransportBuilder, TransportError, TransportSettings, TransportStage,
};

mod naming;
pub use naming::convention::NamingConvention;
pub use naming::name_helper::{EntityNameHelper, NamingError, TopicNameConvention, SEGMENT_SEPARATOR};
pub use naming::type_descriptor::TypeDescriptor;

#[doc(hidden)]
pub mod observability;
pub mod runtime;
