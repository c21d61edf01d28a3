//! Edge router that validates requests before forwarding them to the
//! backing server. It holds no database of its own, so bad input is
//! rejected without a round trip.

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::error::{ApiError, ValidationErrorBuilder};
use crate::api::identity::{SharerId, X_SHARER_USER_ID};
use crate::api::validation;
use crate::db::{
    CreateBookingRequest, CreateCommentRequest, CreateItemRequest, CreateRequestBody,
    CreateUserRequest, UpdateItemRequest, UpdateUserRequest,
};
use crate::domain::bookings::BookingState;

pub struct GatewayState {
    pub client: Client,
    pub server_url: String,
}

impl GatewayState {
    pub fn new(server_url: String) -> Self {
        Self {
            client: Client::new(),
            server_url,
        }
    }
}

pub fn create_gateway_router(state: Arc<GatewayState>) -> Router {
    let user_routes = Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", patch(update_user))
        .route("/:id", delete(delete_user));

    let item_routes = Router::new()
        .route("/", post(create_item))
        .route("/", get(list_items))
        .route("/search", get(search_items))
        .route("/:id", get(get_item))
        .route("/:id", patch(update_item))
        .route("/:id/comment", post(add_comment));

    let booking_routes = Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/owner", get(list_owner_bookings))
        .route("/:id", get(get_booking))
        .route("/:id", patch(update_booking_status));

    let request_routes = Router::new()
        .route("/", post(create_request))
        .route("/", get(list_own_requests))
        .route("/all", get(list_other_requests))
        .route("/:id", get(get_request));

    Router::new()
        .nest("/users", user_routes)
        .nest("/items", item_routes)
        .nest("/bookings", booking_routes)
        .nest("/requests", request_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Relays a request to the backing server and mirrors its status and body.
async fn forward(
    state: &GatewayState,
    method: reqwest::Method,
    path: &str,
    query: Option<&str>,
    user_id: Option<&str>,
    body: Option<Value>,
) -> Result<Response, ApiError> {
    let url = match query {
        Some(q) if !q.is_empty() => format!("{}{}?{}", state.server_url, path, q),
        _ => format!("{}{}", state.server_url, path),
    };

    let mut request = state.client.request(method, &url);
    if let Some(id) = user_id {
        request = request.header(X_SHARER_USER_ID, id);
    }
    if let Some(json) = body {
        request = request.json(&json);
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::error!(error = %e, url = %url, "Failed to reach backing server");
        ApiError::bad_gateway("Backing server is unavailable")
    })?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|_| ApiError::bad_gateway("Backing server returned an invalid status"))?;
    let bytes = upstream
        .bytes()
        .await
        .map_err(|_| ApiError::bad_gateway("Failed to read response from backing server"))?;

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}

fn to_value<T: serde::Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|_| ApiError::internal("Failed to serialize request body"))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    from: i64,
    #[serde(default = "default_page_size")]
    size: i64,
}

fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    #[serde(default = "default_state")]
    state: String,
    #[serde(default)]
    from: i64,
    #[serde(default = "default_page_size")]
    size: i64,
}

fn default_state() -> String {
    "ALL".to_string()
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    text: String,
    #[serde(default)]
    from: i64,
    #[serde(default = "default_page_size")]
    size: i64,
}

#[derive(Debug, Deserialize)]
struct ApproveQuery {
    approved: bool,
}

fn check_uuid(id: &str, field: &str) -> Result<(), ApiError> {
    validation::validate_uuid(id, field).map_err(|e| ApiError::validation_field(field, e))
}

fn check_pagination(from: i64, size: i64) -> Result<(), ApiError> {
    validation::validate_pagination(from, size).map_err(ApiError::bad_request)
}

fn check_state(state: &str) -> Result<(), ApiError> {
    state
        .parse::<BookingState>()
        .map(|_| ())
        .map_err(ApiError::bad_request)
}

// -- Users --

async fn create_user(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validation::validate_user_name(&req.name) {
        errors.add("name", e);
    }
    if let Err(e) = validation::validate_email(&req.email) {
        errors.add("email", e);
    }
    errors.finish()?;

    forward(
        &state,
        reqwest::Method::POST,
        "/users",
        None,
        None,
        Some(to_value(&req)?),
    )
    .await
}

async fn update_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    let mut errors = ValidationErrorBuilder::new();
    if let Some(name) = &req.name {
        if let Err(e) = validation::validate_user_name(name) {
            errors.add("name", e);
        }
    }
    if let Some(email) = &req.email {
        if let Err(e) = validation::validate_email(email) {
            errors.add("email", e);
        }
    }
    errors.finish()?;

    forward(
        &state,
        reqwest::Method::PATCH,
        &format!("/users/{}", id),
        None,
        None,
        Some(to_value(&req)?),
    )
    .await
}

async fn get_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    forward(
        &state,
        reqwest::Method::GET,
        &format!("/users/{}", id),
        None,
        None,
        None,
    )
    .await
}

async fn list_users(State(state): State<Arc<GatewayState>>) -> Result<Response, ApiError> {
    forward(&state, reqwest::Method::GET, "/users", None, None, None).await
}

async fn delete_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    forward(
        &state,
        reqwest::Method::DELETE,
        &format!("/users/{}", id),
        None,
        None,
        None,
    )
    .await
}

// -- Items --

async fn create_item(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Json(req): Json<CreateItemRequest>,
) -> Result<Response, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validation::validate_item_name(&req.name) {
        errors.add("name", e);
    }
    if let Err(e) = validation::validate_description(&req.description) {
        errors.add("description", e);
    }
    if let Some(request_id) = &req.request_id {
        if let Err(e) = validation::validate_uuid(request_id, "request_id") {
            errors.add("request_id", e);
        }
    }
    errors.finish()?;

    forward(
        &state,
        reqwest::Method::POST,
        "/items",
        None,
        Some(&user_id),
        Some(to_value(&req)?),
    )
    .await
}

async fn update_item(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    let mut errors = ValidationErrorBuilder::new();
    if let Some(name) = &req.name {
        if let Err(e) = validation::validate_item_name(name) {
            errors.add("name", e);
        }
    }
    if let Some(description) = &req.description {
        if let Err(e) = validation::validate_description(description) {
            errors.add("description", e);
        }
    }
    errors.finish()?;

    forward(
        &state,
        reqwest::Method::PATCH,
        &format!("/items/{}", id),
        None,
        Some(&user_id),
        Some(to_value(&req)?),
    )
    .await
}

async fn get_item(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    forward(
        &state,
        reqwest::Method::GET,
        &format!("/items/{}", id),
        None,
        Some(&user_id),
        None,
    )
    .await
}

async fn list_items(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    check_pagination(page.from, page.size)?;
    forward(
        &state,
        reqwest::Method::GET,
        "/items",
        query.as_deref(),
        Some(&user_id),
        None,
    )
    .await
}

async fn search_items(
    State(state): State<Arc<GatewayState>>,
    Query(search): Query<SearchQuery>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    check_pagination(search.from, search.size)?;
    forward(
        &state,
        reqwest::Method::GET,
        "/items/search",
        query.as_deref(),
        None,
        None,
    )
    .await
}

async fn add_comment(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    if let Err(e) = validation::validate_comment_text(&req.text) {
        return Err(ApiError::validation_field("text", e));
    }
    forward(
        &state,
        reqwest::Method::POST,
        &format!("/items/{}/comment", id),
        None,
        Some(&user_id),
        Some(to_value(&req)?),
    )
    .await
}

// -- Bookings --

async fn create_booking(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Response, ApiError> {
    check_uuid(&req.item_id, "item_id")?;
    if let Err(e) =
        validation::validate_booking_dates(req.start_date, req.end_date, chrono::Utc::now())
    {
        return Err(ApiError::bad_request(e));
    }
    forward(
        &state,
        reqwest::Method::POST,
        "/bookings",
        None,
        Some(&user_id),
        Some(to_value(&req)?),
    )
    .await
}

async fn update_booking_status(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
    Query(_approve): Query<ApproveQuery>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    forward(
        &state,
        reqwest::Method::PATCH,
        &format!("/bookings/{}", id),
        query.as_deref(),
        Some(&user_id),
        None,
    )
    .await
}

async fn get_booking(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    forward(
        &state,
        reqwest::Method::GET,
        &format!("/bookings/{}", id),
        None,
        Some(&user_id),
        None,
    )
    .await
}

async fn list_bookings(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Query(q): Query<StateQuery>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    check_state(&q.state)?;
    check_pagination(q.from, q.size)?;
    forward(
        &state,
        reqwest::Method::GET,
        "/bookings",
        query.as_deref(),
        Some(&user_id),
        None,
    )
    .await
}

async fn list_owner_bookings(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Query(q): Query<StateQuery>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    check_state(&q.state)?;
    check_pagination(q.from, q.size)?;
    forward(
        &state,
        reqwest::Method::GET,
        "/bookings/owner",
        query.as_deref(),
        Some(&user_id),
        None,
    )
    .await
}

// -- Requests --

async fn create_request(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Json(req): Json<CreateRequestBody>,
) -> Result<Response, ApiError> {
    if let Err(e) = validation::validate_description(&req.description) {
        return Err(ApiError::validation_field("description", e));
    }
    forward(
        &state,
        reqwest::Method::POST,
        "/requests",
        None,
        Some(&user_id),
        Some(to_value(&req)?),
    )
    .await
}

async fn list_own_requests(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
) -> Result<Response, ApiError> {
    forward(
        &state,
        reqwest::Method::GET,
        "/requests",
        None,
        Some(&user_id),
        None,
    )
    .await
}

async fn list_other_requests(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    check_pagination(page.from, page.size)?;
    forward(
        &state,
        reqwest::Method::GET,
        "/requests/all",
        query.as_deref(),
        Some(&user_id),
        None,
    )
    .await
}

async fn get_request(
    State(state): State<Arc<GatewayState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    check_uuid(&id, "id")?;
    forward(
        &state,
        reqwest::Method::GET,
        &format!("/requests/{}", id),
        None,
        Some(&user_id),
        None,
    )
    .await
}
