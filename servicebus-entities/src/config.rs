/********************************************************************************
 * Copyright (c) 2025 Contributors to the Eclipse Foundation
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

//! JSON5 configuration for the lifecycle manager.

use crate::lifecycle::teardown::TeardownPolicy;
use crate::naming::convention::NamingConvention;
use crate::naming::name_helper::{EntityNameHelper, NamingError, TopicNameConvention};
use crate::observability::events;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const COMPONENT: &str = "lifecycle_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse config: {0}")]
    Parse(#[from] json5::Error),
}

/// Lifecycle manager configuration.
///
/// ```
/// use servicebus_entities::{LifecycleConfig, NamingConvention, TeardownPolicy};
///
/// let config = LifecycleConfig::from_json5_str(
///     r#"{
///         connection_string: "Endpoint=sb://example.servicebus.windows.net/",
///         naming: "legacy",
///         teardown_policy: "fail_fast",
///         entity_name_suffix: "ci-42",
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.naming, NamingConvention::Legacy);
/// assert_eq!(config.teardown_policy, TeardownPolicy::FailFast);
/// assert_eq!(config.entity_name("timeouttest").unwrap(), "timeouttest_ci_42");
/// ```
#[derive(Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LifecycleConfig {
    pub connection_string: String,
    #[serde(default)]
    pub naming: NamingConvention,
    #[serde(default)]
    pub teardown_policy: TeardownPolicy,
    /// Appended to entity names so concurrent test runs do not share queues.
    #[serde(default)]
    pub entity_name_suffix: Option<String>,
}

impl std::fmt::Debug for LifecycleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleConfig")
            .field("naming", &self.naming)
            .field("teardown_policy", &self.teardown_policy)
            .field("entity_name_suffix", &self.entity_name_suffix)
            .finish_non_exhaustive()
    }
}

impl LifecycleConfig {
    pub fn new(connection_string: &str) -> Self {
        Self {
            connection_string: connection_string.to_string(),
            naming: NamingConvention::default(),
            teardown_policy: TeardownPolicy::default(),
            entity_name_suffix: None,
        }
    }

    pub fn from_json5_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            warn!(
                event = events::CONFIG_LOAD_FAILED,
                component = COMPONENT,
                reason = "io",
                err = %source,
                "unable to read lifecycle config"
            );
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config = Self::from_json5_str(&contents).inspect_err(|err| {
            warn!(
                event = events::CONFIG_LOAD_FAILED,
                component = COMPONENT,
                reason = "parse",
                err = %err,
                "unable to parse lifecycle config"
            );
        })?;

        debug!(
            event = events::CONFIG_LOAD_OK,
            component = COMPONENT,
            naming = %config.naming,
            policy = %config.teardown_policy,
            suffix = ?config.entity_name_suffix,
            "loaded lifecycle config"
        );
        Ok(config)
    }

    pub fn name_helper(&self) -> EntityNameHelper {
        EntityNameHelper::new(self.naming)
    }

    /// Per-run entity name for `base`: `base` or `base-suffix`, made valid for the
    /// configured convention.
    pub fn entity_name(&self, base: &str) -> Result<String, NamingError> {
        let raw = match &self.entity_name_suffix {
            Some(suffix) if !suffix.is_empty() => format!("{base}-{suffix}"),
            _ => base.to_string(),
        };

        let name_helper = self.name_helper();
        let name = name_helper.sanitize(&raw);
        name_helper.validate_queue_name(&name)?;
        Ok(name)
    }
}
