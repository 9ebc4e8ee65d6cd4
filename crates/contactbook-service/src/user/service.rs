//! User profile and avatar updates.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use contactbook_auth::SessionManager;
use contactbook_core::error::AppError;
use contactbook_database::UserStore;
use contactbook_entity::user::User;
use contactbook_storage::AvatarProcessor;

use crate::context::RequestContext;

/// Reads and updates the acting user's own account.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    avatars: AvatarProcessor,
    sessions: Arc<SessionManager>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        avatars: AvatarProcessor,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            users,
            avatars,
            sessions,
        }
    }

    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Store a new avatar image and point the account at it.
    pub async fn update_avatar(&self, ctx: &RequestContext, data: Bytes) -> Result<User, AppError> {
        let stored = self.avatars.store(&ctx.email, data).await?;
        let user = self
            .users
            .update_avatar(ctx.user_id, &stored.url)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.sessions.forget_user(ctx.user_id).await;
        info!(user_id = %ctx.user_id, path = %stored.path, "Avatar updated");
        Ok(user)
    }
}
