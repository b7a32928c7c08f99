//! Structured observability vocabulary.
//!
//! Event names and field keys are shared across the crate so log consumers can filter
//! on stable values independent of message wording.

pub mod events;
pub mod fields;
