//! # contactbook-database
//!
//! Persistence for Contactbook. The [`store`] module defines the
//! owner-scoped store traits the services program against; they are
//! implemented by the PostgreSQL [`repositories`] and by the process-local
//! [`memory`] backend. [`Database`] picks one according to configuration.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use backend::Database;
pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ContactStore, PersonStore, UserStore};
