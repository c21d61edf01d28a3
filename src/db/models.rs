use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: String,
    pub request_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "WAITING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: String,
    pub item_id: String,
    pub booker_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItemRequest {
    pub id: String,
    pub requestor_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub item_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// DTOs for API

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestBody {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

// Enrichment structs. Composition instead of DTO inheritance: the base
// record is embedded, the extra fields are attached only on the query
// paths that need them.

/// Abbreviated booking used for the owner's last/next slots on an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingShort {
    pub id: String,
    pub booker_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<Booking> for BookingShort {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
        }
    }
}

/// Item with its comments, plus last/next approved bookings when the
/// caller owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemWithDetails {
    #[serde(flatten)]
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<BookingShort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<Comment>,
}

/// Request with the items offered against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestWithItems {
    #[serde(flatten)]
    pub request: ItemRequest,
    pub items: Vec<Item>,
}
