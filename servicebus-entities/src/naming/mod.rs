//! Name resolver layer.
//!
//! Pure translation of message types and free-form strings into broker entity names,
//! and validation of (possibly multi-segment) names, under either the modern or the
//! legacy [`NamingConvention`](convention::NamingConvention).
//!
//! ```
//! use servicebus_entities::{EntityNameHelper, NamingConvention, TopicNameConvention};
//!
//! let legacy = EntityNameHelper::new(NamingConvention::Legacy);
//!
//! // Legacy names never contain periods or hyphens and are lowercase.
//! assert_eq!(legacy.sanitize("Billing/Invoices.V2"), "billing/invoices_v2");
//! ```

pub(crate) mod convention;
pub(crate) mod name_helper;
pub(crate) mod type_descriptor;
