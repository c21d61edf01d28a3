//! Item-request API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::db::{CreateRequestBody, ItemRequest, RequestWithItems};
use crate::domain::requests;
use crate::AppState;

use super::error::ApiError;
use super::identity::SharerId;
use super::items::PageQuery;
use super::validation::{validate_description, validate_uuid};

/// Post an open call for an item
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Json(req): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<ItemRequest>), ApiError> {
    if let Err(e) = validate_description(&req.description) {
        return Err(ApiError::validation_field("description", e));
    }

    let request = requests::add(&state.db, &user_id, req).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// The caller's own requests, each with the items offered against it
pub async fn list_own_requests(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
) -> Result<Json<Vec<RequestWithItems>>, ApiError> {
    let requests = requests::get_all_by_requestor(&state.db, &user_id).await?;
    Ok(Json(requests))
}

/// Other users' requests, paginated
pub async fn list_other_requests(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<RequestWithItems>>, ApiError> {
    let requests =
        requests::get_all_from_others(&state.db, &user_id, page.from, page.size).await?;
    Ok(Json(requests))
}

/// Get one request with its offered items
pub async fn get_request(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
) -> Result<Json<RequestWithItems>, ApiError> {
    if let Err(e) = validate_uuid(&id, "request_id") {
        return Err(ApiError::validation_field("request_id", e));
    }

    let request = requests::get_by_id(&state.db, &user_id, &id).await?;
    Ok(Json(request))
}
