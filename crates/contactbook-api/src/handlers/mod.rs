//! Request handlers, one module per resource.

pub mod auth;
pub mod contact;
pub mod health;
pub mod person;
pub mod user;
