//! Canonical structured event names used across `servicebus-entities`.

// Provisioning events.
pub const TRANSPORT_REUSE: &str = "transport_reuse";
pub const TRANSPORT_BUILD_FAILED: &str = "transport_build_failed";
pub const TRANSPORT_PURGE_OK: &str = "transport_purge_ok";
pub const TRANSPORT_PURGE_FAILED: &str = "transport_purge_failed";
pub const TRANSPORT_INITIALIZE_OK: &str = "transport_initialize_ok";
pub const TRANSPORT_INITIALIZE_FAILED: &str = "transport_initialize_failed";
pub const TRANSPORT_ONE_WAY_CREATE: &str = "transport_one_way_create";
pub const TRANSPORT_DISPOSE_OK: &str = "transport_dispose_ok";
pub const TRANSPORT_DISPOSE_FAILED: &str = "transport_dispose_failed";
pub const ADDRESS_REJECTED: &str = "address_rejected";

// Entity deletion events.
pub const ENTITY_DELETE_START: &str = "entity_delete_start";
pub const ENTITY_DELETE_OK: &str = "entity_delete_ok";
pub const ENTITY_DELETE_ABSENT: &str = "entity_delete_absent";
pub const ENTITY_DELETE_FAILED: &str = "entity_delete_failed";

// Teardown events.
pub const TEARDOWN_START: &str = "teardown_start";
pub const TEARDOWN_OK: &str = "teardown_ok";
pub const TEARDOWN_INCOMPLETE: &str = "teardown_incomplete";
pub const TEARDOWN_ABORTED: &str = "teardown_aborted";

// Blocking bridge events.
pub const BRIDGE_BLOCK_START: &str = "bridge_block_start";
pub const BRIDGE_BLOCK_CANCELLED: &str = "bridge_block_cancelled";

// Configuration events.
pub const CONFIG_LOAD_OK: &str = "config_load_ok";
pub const CONFIG_LOAD_FAILED: &str = "config_load_failed";
