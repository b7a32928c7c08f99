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

//! Canonical structured field keys and value-format helpers.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const ADDRESS: &str = "address";
pub const ENTITY_KIND: &str = "entity_kind";
pub const ENTITY_NAME: &str = "entity_name";
pub const TRACKED: &str = "tracked";
pub const DELETED: &str = "deleted";
pub const ALREADY_ABSENT: &str = "already_absent";
pub const FAILED: &str = "failed";
pub const POLICY: &str = "policy";
pub const CALLER_THREAD: &str = "caller_thread";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const DEFAULT_THREAD: &str = "unknown-thread";
pub const REASON_RUNTIME_SHUTDOWN: &str = "runtime_shutdown";
pub const REASON_ROLLBACK_AFTER_PROVISION_FAILURE: &str = "rollback_after_provision_failure";

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

/// Formats an optional input address; one-way transports have none.
pub fn format_address(address: Option<&str>) -> String {
    address.unwrap_or(NONE).to_string()
}
