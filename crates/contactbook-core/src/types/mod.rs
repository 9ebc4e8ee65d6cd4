//! Core type definitions used across the Contactbook workspace.

pub mod pagination;

pub use pagination::PageRequest;
