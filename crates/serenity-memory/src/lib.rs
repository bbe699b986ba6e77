// In-memory store backend.
//
// Implements the core `StoreAdapter` trait over a `HashMap` keyed by table
// name. Used by the integration tests and for local development; data is
// lost when the store is dropped.

pub mod adapter;

pub use adapter::MemoryStore;
