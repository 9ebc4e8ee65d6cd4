//! Person handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use contactbook_core::error::AppError;

use crate::dto::request::PersonRequest;
use crate::dto::response::{ApiResponse, ContactResponse, PersonResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

fn person_not_found() -> AppError {
    AppError::not_found("Person not found")
}

/// GET /api/persons
pub async fn list_persons(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PersonResponse>>>, ApiError> {
    let persons = state.person_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(persons.into_iter().map(Into::into).collect())))
}

/// GET /api/persons/{id}
pub async fn get_person(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PersonResponse>>, ApiError> {
    let person = state
        .person_service
        .get(&auth, id)
        .await?
        .ok_or_else(person_not_found)?;
    Ok(Json(ApiResponse::ok(person.into())))
}

/// GET /api/persons/{id}/contacts
pub async fn list_person_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ContactResponse>>>, ApiError> {
    let contacts = state.contact_service.list_by_person(&auth, id).await?;
    Ok(Json(ApiResponse::ok(contacts.into_iter().map(Into::into).collect())))
}

/// POST /api/persons
pub async fn create_person(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<PersonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PersonResponse>>), ApiError> {
    let person = state.person_service.create(&auth, &req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(person.into()))))
}

/// PUT /api/persons/{id}
pub async fn update_person(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<PersonRequest>,
) -> Result<Json<ApiResponse<PersonResponse>>, ApiError> {
    let person = state
        .person_service
        .update(&auth, id, &req.into())
        .await?
        .ok_or_else(person_not_found)?;
    Ok(Json(ApiResponse::ok(person.into())))
}

/// DELETE /api/persons/{id}
pub async fn delete_person(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PersonResponse>>, ApiError> {
    let person = state
        .person_service
        .remove(&auth, id)
        .await?
        .ok_or_else(person_not_found)?;
    Ok(Json(ApiResponse::ok(person.into())))
}
