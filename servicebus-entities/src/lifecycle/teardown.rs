//! Teardown policy and outcome reporting.

use crate::lifecycle::management::{DeleteOutcome, ManagementError};
use crate::lifecycle::transport::TransportError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// What teardown does when a tracked resource cannot be cleaned up.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownPolicy {
    /// Keep cleaning the remaining resources and report every failure at the end.
    #[default]
    ContinueAndReport,
    /// Stop at the first failure; the failing and unprocessed resources stay tracked.
    FailFast,
}

impl Display for TeardownPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TeardownPolicy::ContinueAndReport => write!(f, "continue_and_report"),
            TeardownPolicy::FailFast => write!(f, "fail_fast"),
        }
    }
}

/// One resource that could not be cleaned up.
#[derive(Debug, Error)]
pub enum TeardownFailure {
    #[error("unable to delete queue '{address}': {source}")]
    Delete {
        address: String,
        source: ManagementError,
    },

    #[error("unable to dispose transport for '{address}': {source}")]
    Dispose {
        address: String,
        source: TransportError,
    },
}

impl TeardownFailure {
    pub fn address(&self) -> &str {
        match self {
            TeardownFailure::Delete { address, .. } | TeardownFailure::Dispose { address, .. } => {
                address
            }
        }
    }
}

/// Addresses cleaned up by a teardown pass.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TeardownReport {
    /// Queues that existed and were deleted.
    pub deleted: Vec<String>,
    /// Queues that had already been removed, e.g. manually by an operator.
    pub already_absent: Vec<String>,
}

impl TeardownReport {
    pub(crate) fn record(&mut self, address: &str, outcome: DeleteOutcome) {
        match outcome {
            DeleteOutcome::Deleted => self.deleted.push(address.to_string()),
            DeleteOutcome::AlreadyAbsent => self.already_absent.push(address.to_string()),
        }
    }

    pub fn cleaned_count(&self) -> usize {
        self.deleted.len() + self.already_absent.len()
    }
}
