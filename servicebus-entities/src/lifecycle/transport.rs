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

//! Minimal transport contract the lifecycle manager provisions and tears down.

use crate::naming::name_helper::TopicNameConvention;
use async_trait::async_trait;
use std::error::Error as StdError;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a [`Transport`] or [`TransportBuilder`] implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Step of a transport's lifecycle, used to qualify failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportStage {
    Build,
    Purge,
    Initialize,
    Dispose,
}

impl Display for TransportStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportStage::Build => write!(f, "build"),
            TransportStage::Purge => write!(f, "purge"),
            TransportStage::Initialize => write!(f, "initialize"),
            TransportStage::Dispose => write!(f, "dispose"),
        }
    }
}

/// A broker transport handle.
///
/// Logging and task scheduling are ambient (`tracing`, `tokio`), so implementations
/// only need to honor these four operations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Queue this transport receives from, or `None` for a one-way (send-only) client.
    fn input_queue_address(&self) -> Option<&str>;

    /// Performs whatever remote provisioning the transport needs, e.g. create-if-missing.
    async fn initialize(&self) -> Result<(), TransportError>;

    /// Clears pending messages at the input queue without deleting the queue.
    async fn purge_input_queue(&self) -> Result<(), TransportError>;

    /// Releases local resources. The remote entity is left untouched.
    async fn dispose(&self) -> Result<(), TransportError>;
}

/// Everything a [`TransportBuilder`] needs to construct one transport.
#[derive(Clone)]
pub struct TransportSettings {
    pub connection_string: String,
    pub input_queue_address: Option<String>,
    pub naming: Arc<dyn TopicNameConvention>,
}

impl Debug for TransportSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The connection string carries credentials.
        f.debug_struct("TransportSettings")
            .field("input_queue_address", &self.input_queue_address)
            .finish_non_exhaustive()
    }
}

/// Constructs transports for the lifecycle manager.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use servicebus_entities::{
///     TopicNameConvention, Transport, TransportBuilder, TransportError, TransportSettings,
/// };
///
/// struct NullTransport {
///     input_queue_address: Option<String>,
/// }
///
/// #[async_trait]
/// impl Transport for NullTransport {
///     fn input_queue_address(&self) -> Option<&str> {
///         self.input_queue_address.as_deref()
///     }
///
///     async fn initialize(&self) -> Result<(), TransportError> {
///         Ok(())
///     }
///
///     async fn purge_input_queue(&self) -> Result<(), TransportError> {
///         Ok(())
///     }
///
///     async fn dispose(&self) -> Result<(), TransportError> {
///         Ok(())
///     }
/// }
///
/// struct NullTransportBuilder;
///
/// impl TransportBuilder for NullTransportBuilder {
///     fn build(&self, settings: &TransportSettings) -> Result<Arc<dyn Transport>, TransportError> {
///         if let Some(address) = &settings.input_queue_address {
///             settings
///                 .naming
///                 .validate_queue_name(address)
///                 .map_err(|err| TransportError::with_source("invalid input queue", err))?;
///         }
///
///         Ok(Arc::new(NullTransport {
///             input_queue_address: settings.input_queue_address.clone(),
///         }))
///     }
/// }
/// ```
pub trait TransportBuilder: Send + Sync {
    fn build(&self, settings: &TransportSettings) -> Result<Arc<dyn Transport>, TransportError>;
}
