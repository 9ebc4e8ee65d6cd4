//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, validates it, and injects the request context.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use contactbook_auth::Claims;
use contactbook_core::error::AppError;
use contactbook_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub context: RequestContext,
    /// Claims of the presented access token.
    pub claims: Claims,
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::authentication("Not authenticated"))?;

        let (claims, user) = state.session_manager.authenticate(bearer.token()).await?;

        Ok(AuthUser {
            context: RequestContext::from(user),
            claims,
        })
    }
}
