//! # contactbook-storage
//!
//! File storage for Contactbook: a local filesystem implementation of
//! [`StorageProvider`](contactbook_core::traits::StorageProvider) and the
//! avatar pipeline that crops uploads and writes them through it.

pub mod avatar;
pub mod providers;

pub use avatar::{AvatarProcessor, StoredAvatar};
pub use providers::local::LocalStorageProvider;
