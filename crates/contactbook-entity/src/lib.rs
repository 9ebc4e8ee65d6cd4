//! # contactbook-entity
//!
//! Domain entity models shared by the store, service, and API layers.
//! Every entity derives `sqlx::FromRow` so the PostgreSQL repositories
//! can map rows directly.

pub mod contact;
pub mod person;
pub mod user;
