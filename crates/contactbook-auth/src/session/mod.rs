//! Account session lifecycle.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
