//! Runs broker futures to completion for synchronous callers.
//!
//! Bridged futures execute on a dedicated runtime, never on the caller's executor, so a
//! caller blocked here cannot be the thread the future needs to make progress. The
//! future must not depend on resources driven by the caller's own runtime (for example
//! a client bound to a current-thread runtime the caller is blocking).

use crate::observability::{events, fields};
use lazy_static::lazy_static;
use std::future::Future;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::task;
use tracing::{trace, warn};

const COMPONENT: &str = "blocking_bridge";
const BRIDGE_RUNTIME_THREADS: usize = 4;
const BRIDGE_RUNTIME_THREAD_NAME: &str = "servicebus-entities-bridge";

lazy_static! {
    static ref BRIDGE_RUNTIME: Runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(BRIDGE_RUNTIME_THREADS)
        .thread_name(BRIDGE_RUNTIME_THREAD_NAME)
        .enable_all()
        .build()
        .expect("Unable to create blocking bridge runtime");
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BridgeError {
    #[error("bridged operation was cancelled before completing")]
    Cancelled,
}

/// Blocks the current thread until `future` completes on the bridge runtime.
///
/// Safe to call from plain threads, from inside a multi-thread tokio runtime (the wait
/// moves off the worker via [`task::block_in_place`]) and from a current-thread runtime.
/// A panic inside `future` is resumed on the caller.
pub fn block_on<F>(future: F) -> Result<F::Output, BridgeError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    trace!(
        event = events::BRIDGE_BLOCK_START,
        component = COMPONENT,
        caller_thread = %fields::current_thread_name_or_default(),
        "blocking on bridged operation"
    );

    let join_handle = BRIDGE_RUNTIME.spawn(future);
    let joined = match Handle::try_current().map(|handle| handle.runtime_flavor()) {
        Ok(RuntimeFlavor::CurrentThread) | Err(_) => futures::executor::block_on(join_handle),
        Ok(_) => task::block_in_place(|| futures::executor::block_on(join_handle)),
    };

    match joined {
        Ok(output) => Ok(output),
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => {
            warn!(
                event = events::BRIDGE_BLOCK_CANCELLED,
                component = COMPONENT,
                reason = fields::REASON_RUNTIME_SHUTDOWN,
                err = %err,
                "bridged operation did not complete"
            );
            Err(BridgeError::Cancelled)
        }
    }
}
