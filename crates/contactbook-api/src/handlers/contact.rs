//! Contact handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use contactbook_core::error::AppError;
use contactbook_entity::contact::Contact;

use crate::dto::request::{BlacklistRequest, ContactRequest, SearchParams};
use crate::dto::response::{ApiResponse, ContactResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

fn contact_not_found() -> AppError {
    AppError::not_found("Contact not found")
}

fn one(contact: Contact) -> Json<ApiResponse<ContactResponse>> {
    Json(ApiResponse::ok(contact.into()))
}

fn many(contacts: Vec<Contact>) -> Json<ApiResponse<Vec<ContactResponse>>> {
    Json(ApiResponse::ok(contacts.into_iter().map(Into::into).collect()))
}

/// GET /api/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<ContactResponse>>>, ApiError> {
    let page = params.into_page_request(&state.config.contacts)?;
    let contacts = state.contact_service.list(&auth, page).await?;
    Ok(many(contacts))
}

/// GET /api/contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    let contact = state
        .contact_service
        .get(&auth, id)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(one(contact))
}

/// GET /api/contacts/by-email/{email}
pub async fn get_contact_by_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    let contact = state
        .contact_service
        .get_by_email(&auth, &email)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(one(contact))
}

/// GET /api/contacts/by-phone/{phone}
pub async fn get_contact_by_phone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(phone): Path<String>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    let contact = state
        .contact_service
        .get_by_phone(&auth, &phone)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(one(contact))
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactResponse>>), ApiError> {
    let contact = state.contact_service.create(&auth, &req.into()).await?;
    Ok((StatusCode::CREATED, one(contact)))
}

/// PUT /api/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ContactRequest>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    let contact = state
        .contact_service
        .update(&auth, id, &req.into())
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(one(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .contact_service
        .remove(&auth, id)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/contacts/{id}/blacklist
pub async fn set_blacklist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<BlacklistRequest>,
) -> Result<Json<ApiResponse<ContactResponse>>, ApiError> {
    let contact = state
        .contact_service
        .set_blocked(&auth, id, req.blocked)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(one(contact))
}

/// GET /api/contacts/search?find=
pub async fn search_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<ContactResponse>>>, ApiError> {
    let contacts = state.search_service.search(&auth, &params.find).await?;
    if contacts.is_empty() {
        return Err(contact_not_found().into());
    }
    Ok(many(contacts))
}

/// GET /api/contacts/birthdays
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Response, ApiError> {
    let page = params.into_page_request(&state.config.contacts)?;
    let contacts = state.birthday_service.upcoming(&auth, page).await?;
    if contacts.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(many(contacts).into_response())
}
