//! In-memory backend for local development and tests.

pub mod store;

pub use store::MemoryStore;
