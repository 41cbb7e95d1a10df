//! Reference host implementations.
//!
//! - `simple`: an in-memory player used by tests, benches and doc examples.

pub mod simple;
