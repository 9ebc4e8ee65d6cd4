//! # contactbook-auth
//!
//! Authentication for Contactbook.
//!
//! ## Modules
//!
//! - `jwt`: token creation, validation, and the logout blocklist
//! - `password`: Argon2id hashing and sign-up password policy
//! - `session`: sign-up, login, refresh, logout, and per-request authentication

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{LoginResult, SessionManager};
