//! Person management.

pub mod service;

pub use service::PersonService;
