//! User self-service handlers.

use axum::Json;
use axum::extract::{Multipart, State};

use contactbook_core::error::AppError;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Multipart field carrying the avatar image.
const AVATAR_FIELD: &str = "file";

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /api/users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(AVATAR_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;
            upload = Some(data);
            break;
        }
    }

    let data = upload
        .ok_or_else(|| AppError::validation(format!("Missing multipart field '{AVATAR_FIELD}'")))?;
    let user = state.user_service.update_avatar(&auth, data).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
