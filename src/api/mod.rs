mod bookings;
pub mod error;
pub mod identity;
mod items;
mod requests;
mod users;
pub mod validation;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let user_routes = Router::new()
        .route("/", post(users::create_user))
        .route("/", get(users::list_users))
        .route("/:id", get(users::get_user))
        .route("/:id", patch(users::update_user))
        .route("/:id", delete(users::delete_user));

    let item_routes = Router::new()
        .route("/", post(items::create_item))
        .route("/", get(items::list_items))
        .route("/search", get(items::search_items))
        .route("/:id", get(items::get_item))
        .route("/:id", patch(items::update_item))
        .route("/:id/comment", post(items::add_comment));

    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/", get(bookings::list_bookings))
        .route("/owner", get(bookings::list_owner_bookings))
        .route("/:id", get(bookings::get_booking))
        .route("/:id", patch(bookings::update_booking_status));

    let request_routes = Router::new()
        .route("/", post(requests::create_request))
        .route("/", get(requests::list_own_requests))
        .route("/all", get(requests::list_other_requests))
        .route("/:id", get(requests::get_request));

    Router::new()
        .route("/health", get(health_check))
        .nest("/users", user_routes)
        .nest("/items", item_routes)
        .nest("/bookings", booking_routes)
        .nest("/requests", request_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
