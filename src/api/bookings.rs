//! Booking API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{Booking, CreateBookingRequest};
use crate::domain::bookings;
use crate::AppState;

use super::error::ApiError;
use super::identity::SharerId;
use super::items::default_page_size;
use super::validation::validate_uuid;

fn default_state() -> String {
    "ALL".to_string()
}

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

#[derive(Debug, Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

/// Request a booking on an item
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    if let Err(e) = validate_uuid(&req.item_id, "item_id") {
        return Err(ApiError::validation_field("item_id", e));
    }

    let booking = bookings::add(&state.db, &user_id, req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a waiting booking; item owner only
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
    Query(query): Query<ApproveQuery>,
) -> Result<Json<Booking>, ApiError> {
    if let Err(e) = validate_uuid(&id, "booking_id") {
        return Err(ApiError::validation_field("booking_id", e));
    }

    let booking = bookings::update_status(&state.db, &user_id, &id, query.approved).await?;
    Ok(Json(booking))
}

/// Get a booking; visible to the booker and the item owner
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    if let Err(e) = validate_uuid(&id, "booking_id") {
        return Err(ApiError::validation_field("booking_id", e));
    }

    let booking = bookings::get_by_id(&state.db, &user_id, &id).await?;
    Ok(Json(booking))
}

/// The caller's bookings, filtered by state
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings =
        bookings::get_all_by_booker_id(&state.db, &user_id, &query.state, query.from, query.size)
            .await?;
    Ok(Json(bookings))
}

/// Bookings on the caller's items, filtered by state
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings =
        bookings::get_all_by_owner_id(&state.db, &user_id, &query.state, query.from, query.size)
            .await?;
    Ok(Json(bookings))
}
