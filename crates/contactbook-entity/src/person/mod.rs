//! Address-book person entity.

pub mod model;

pub use model::{Person, PersonDraft};
