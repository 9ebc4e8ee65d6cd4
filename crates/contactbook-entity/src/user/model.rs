//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account. Owns persons and contacts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display login name.
    pub username: String,
    /// Unique email address, used to log in.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Public URL of the avatar image.
    pub avatar_url: Option<String>,
    /// The currently valid refresh token, if a session is open.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether `token` is the refresh token issued last.
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// The subset of a user that authenticated requests carry around.
///
/// Unlike [`User`] this round-trips through JSON, so it is what the
/// cache stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            avatar_url: None,
            refresh_token: Some("refresh-1".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_serialization_hides_secrets() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn test_holds_refresh_token() {
        let user = user();
        assert!(user.holds_refresh_token("refresh-1"));
        assert!(!user.holds_refresh_token("refresh-2"));
    }
}
