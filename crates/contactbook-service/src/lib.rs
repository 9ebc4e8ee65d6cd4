//! # contactbook-service
//!
//! Business logic for Contactbook. Each service is built from `Arc`
//! handles to the stores and collaborators it needs and takes a
//! [`RequestContext`] naming the acting user, so every query stays
//! scoped to that user's rows.

pub mod context;
pub mod contact;
pub mod person;
pub mod user;

pub use contact::{BirthdayService, ContactService, SearchService};
pub use context::RequestContext;
pub use person::PersonService;
pub use user::UserService;

#[cfg(test)]
pub(crate) mod testing;
