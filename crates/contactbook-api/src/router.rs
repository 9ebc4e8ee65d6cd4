//! Route definitions for the Contactbook HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`. Contact
//! routes carry a rate limit policy each: reads, writes, or lookups.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::middleware::rate_limit::{limit_lookups, limit_reads, limit_writes};
use crate::state::AppState;

/// Build the `/api` router with every route and its state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(person_routes())
        .merge(contact_routes(&state));

    Router::new().nest("/api", api_routes).with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Signup, login, refresh, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/avatar", patch(handlers::user::update_avatar))
}

fn person_routes() -> Router<AppState> {
    use handlers::person::*;

    Router::new()
        .route("/persons", get(list_persons).post(create_person))
        .route(
            "/persons/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
        .route("/persons/{id}/contacts", get(list_person_contacts))
}

fn contact_routes(state: &AppState) -> Router<AppState> {
    use handlers::contact::*;

    let reads = Router::new()
        .route("/contacts", get(list_contacts))
        .route("/contacts/{id}", get(get_contact))
        .route("/contacts/by-email/{email}", get(get_contact_by_email))
        .route("/contacts/by-phone/{phone}", get(get_contact_by_phone))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), limit_reads));

    let writes = Router::new()
        .route("/contacts", post(create_contact))
        .route("/contacts/{id}", axum::routing::put(update_contact).delete(delete_contact))
        .route("/contacts/{id}/blacklist", patch(set_blacklist))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), limit_writes));

    let lookups = Router::new()
        .route("/contacts/search", get(search_contacts))
        .route("/contacts/birthdays", get(upcoming_birthdays))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), limit_lookups));

    reads.merge(writes).merge(lookups)
}
