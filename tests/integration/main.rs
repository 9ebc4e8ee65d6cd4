//! End-to-end tests driving the full router with in-memory backends.

mod helpers;

mod auth_test;
mod avatar_test;
mod contact_test;
mod person_test;
mod rate_limit_test;
