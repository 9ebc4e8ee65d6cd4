//! Avatar image pipeline.

pub mod processor;

pub use processor::{AvatarProcessor, StoredAvatar};
