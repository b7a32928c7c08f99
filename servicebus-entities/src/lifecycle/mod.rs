//! Resource lifecycle layer.
//!
//! - Transport boundary: [`transport::Transport`] and [`transport::TransportBuilder`]
//! - Management boundary: idempotent entity deletion over [`management::ManagementClient`]
//! - Tracking: one provisioning slot per input queue address
//! - Teardown: policy, per-resource failures and the cleanup report

pub(crate) mod error;
pub(crate) mod lifecycle_manager;
pub(crate) mod management;
pub(crate) mod teardown;
pub(crate) mod tracked_transports;
pub(crate) mod transport;
