//! Contact entity.

pub mod model;

pub use model::{Contact, ContactDraft};
