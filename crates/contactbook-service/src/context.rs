//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use contactbook_entity::user::UserSummary;

/// Who is acting on the current request.
///
/// Built by the auth extractor and passed into every service call, which
/// uses `user_id` to scope reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: Uuid, username: String, email: String) -> Self {
        Self {
            user_id,
            username,
            email,
            request_time: Utc::now(),
        }
    }
}

impl From<UserSummary> for RequestContext {
    fn from(user: UserSummary) -> Self {
        Self::new(user.id, user.username, user.email)
    }
}
