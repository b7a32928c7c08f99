use crate::lifecycle::management::ManagementError;
use crate::lifecycle::teardown::{TeardownFailure, TeardownReport};
use crate::lifecycle::transport::{TransportError, TransportStage};
use crate::naming::name_helper::NamingError;
use crate::runtime::blocking_bridge::BridgeError;
use thiserror::Error;

/// Failures of lifecycle manager operations.
///
/// Remote and transport failures are passed through as reported; nothing is retried here.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("transport for '{address}' failed to {stage}: {source}")]
    Transport {
        address: String,
        stage: TransportStage,
        source: TransportError,
    },

    #[error(transparent)]
    Remote(#[from] ManagementError),

    #[error(
        "teardown cleaned {} resource(s) but {} failed",
        .report.cleaned_count(),
        .failures.len()
    )]
    TeardownIncomplete {
        report: TeardownReport,
        failures: Vec<TeardownFailure>,
    },

    #[error("teardown aborted: {failure}")]
    TeardownAborted {
        report: TeardownReport,
        failure: TeardownFailure,
    },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}
