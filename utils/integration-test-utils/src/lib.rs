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

mod in_memory_broker;
pub use in_memory_broker::InMemoryBroker;
mod recording_transport;
pub use recording_transport::{
    RecordingTransport, RecordingTransportBuilder, TransportCallCounts, ONE_WAY_KEY,
};

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
