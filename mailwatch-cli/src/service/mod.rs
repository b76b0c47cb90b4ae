//! Service layer
//!
//! Services hold the console's side effects that are not HTTP: the
//! persisted key/value state that survives between runs.
//!
//! All services are trait-based to enable testing with in-memory doubles.

mod state_store;

pub use state_store::{FileStateStore, StateStore};

#[cfg(test)]
pub use state_store::MemoryStateStore;
