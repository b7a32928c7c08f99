//! Runtime integration layer.
//!
//! Confines the synchronous-over-asynchronous boundary to one place. Everything else in
//! the crate is async end to end; only callers without an async context (test
//! teardown hooks, cleanup scripts) go through [`blocking_bridge::block_on`].
//!
//! ```
//! use servicebus_entities::runtime::blocking_bridge;
//!
//! let answer = blocking_bridge::block_on(async { 6 * 7 }).unwrap();
//! assert_eq!(answer, 42);
//! ```

pub mod blocking_bridge;
