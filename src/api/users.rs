//! User API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::db::{CreateUserRequest, UpdateUserRequest, User};
use crate::domain::users;
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_email, validate_user_name, validate_uuid};

/// Validate a CreateUserRequest
fn validate_create_request(req: &CreateUserRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_user_name(&req.name) {
        errors.add("name", e);
    }

    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }

    errors.finish()
}

/// Validate an UpdateUserRequest
fn validate_update_request(req: &UpdateUserRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Some(ref name) = req.name {
        if let Err(e) = validate_user_name(name) {
            errors.add("name", e);
        }
    }

    if let Some(ref email) = req.email {
        if let Err(e) = validate_email(email) {
            errors.add("email", e);
        }
    }

    errors.finish()
}

/// Sign up a new user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    validate_create_request(&req)?;

    let user = users::add(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Patch a user; only fields present in the body are changed
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    if let Err(e) = validate_uuid(&id, "user_id") {
        return Err(ApiError::validation_field("user_id", e));
    }
    validate_update_request(&req)?;

    let user = users::update(&state.db, &id, req).await?;
    Ok(Json(user))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    if let Err(e) = validate_uuid(&id, "user_id") {
        return Err(ApiError::validation_field("user_id", e));
    }

    let user = users::get_by_id(&state.db, &id).await?;
    Ok(Json(user))
}

/// List all users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = users::get_all(&state.db).await?;
    Ok(Json(users))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Err(e) = validate_uuid(&id, "user_id") {
        return Err(ApiError::validation_field("user_id", e));
    }

    users::delete(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
