//! Item API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{
    Comment, CreateCommentRequest, CreateItemRequest, Item, ItemWithDetails, UpdateItemRequest,
};
use crate::domain::items;
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::identity::SharerId;
use super::validation::{
    validate_comment_text, validate_description, validate_item_name, validate_uuid,
};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

pub(crate) fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

/// Validate a CreateItemRequest
fn validate_create_request(req: &CreateItemRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_item_name(&req.name) {
        errors.add("name", e);
    }

    if let Err(e) = validate_description(&req.description) {
        errors.add("description", e);
    }

    if let Some(ref request_id) = req.request_id {
        if let Err(e) = validate_uuid(request_id, "request_id") {
            errors.add("request_id", e);
        }
    }

    errors.finish()
}

/// Validate an UpdateItemRequest
fn validate_update_request(req: &UpdateItemRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref name) = req.name {
        if let Err(e) = validate_item_name(name) {
            errors.add("name", e);
        }
    }

    if let Some(ref description) = req.description {
        if let Err(e) = validate_description(description) {
            errors.add("description", e);
        }
    }

    errors.finish()
}

/// List an item for rent
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    validate_create_request(&req)?;

    let item = items::add(&state.db, &user_id, req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Patch an item; owner only
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    if let Err(e) = validate_uuid(&id, "item_id") {
        return Err(ApiError::validation_field("item_id", e));
    }
    validate_update_request(&req)?;

    let item = items::update(&state.db, &user_id, &id, req).await?;
    Ok(Json(item))
}

/// Get an item; the owner additionally sees the last/next approved bookings
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
) -> Result<Json<ItemWithDetails>, ApiError> {
    if let Err(e) = validate_uuid(&id, "item_id") {
        return Err(ApiError::validation_field("item_id", e));
    }

    let item = items::get_by_id(&state.db, &user_id, &id).await?;
    Ok(Json(item))
}

/// List the caller's items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<ItemWithDetails>>, ApiError> {
    let items = items::get_by_owner(&state.db, &user_id, page.from, page.size).await?;
    Ok(Json(items))
}

/// Free-text search over available items
pub async fn search_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = items::search(&state.db, &query.text, query.from, query.size).await?;
    Ok(Json(items))
}

/// Add a post-rental comment to an item
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if let Err(e) = validate_uuid(&id, "item_id") {
        return Err(ApiError::validation_field("item_id", e));
    }
    if let Err(e) = validate_comment_text(&req.text) {
        return Err(ApiError::validation_field("text", e));
    }

    let comment = items::add_comment(&state.db, &user_id, &id, req).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
