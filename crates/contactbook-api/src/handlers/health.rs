//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use contactbook_core::traits::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let backend = state.database.backend_name();
    let db_ok = match state.database.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };
    let cache_ok = state.cache.health_check().await.unwrap_or(false);
    let storage_ok = state.storage.health_check().await.unwrap_or(false);

    let status = if db_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let label = |ok: bool| if ok { "ok" } else { "unavailable" };

    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: label(db_ok).to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: format!("{backend}: {}", label(db_ok)),
            cache: label(cache_ok).to_string(),
            storage: format!("{}: {}", state.storage.provider_type(), label(storage_ok)),
        })),
    )
}
