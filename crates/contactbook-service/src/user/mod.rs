//! User profile and avatar.

pub mod service;

pub use service::UserService;
