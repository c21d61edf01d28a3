//! Item service: catalog CRUD, text search, owner-facing enrichment,
//! post-rental comments.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{check_pagination, find_user, page_offset, DomainError, DomainResult};
use crate::db::{
    Booking, BookingShort, BookingStatus, Comment, CreateCommentRequest, CreateItemRequest,
    DbPool, Item, ItemRequest, ItemWithDetails, UpdateItemRequest,
};

/// Create an item owned by `owner_id`. A `request_id`, when given, must
/// reference an existing item request.
pub async fn add(db: &DbPool, owner_id: &str, req: CreateItemRequest) -> DomainResult<Item> {
    find_user(db, owner_id).await?;

    if let Some(ref request_id) = req.request_id {
        let request: Option<ItemRequest> = sqlx::query_as("SELECT * FROM requests WHERE id = ?")
            .bind(request_id)
            .fetch_optional(db)
            .await?;
        if request.is_none() {
            return Err(DomainError::NotFound(format!(
                "Request not found: {}",
                request_id
            )));
        }
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO items (id, name, description, available, owner_id, request_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.available)
    .bind(owner_id)
    .bind(&req.request_id)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    info!(item_id = %id, owner_id = %owner_id, "Item created");
    find_item(db, &id).await
}

/// Partial update, owner only.
pub async fn update(
    db: &DbPool,
    owner_id: &str,
    item_id: &str,
    req: UpdateItemRequest,
) -> DomainResult<Item> {
    find_user(db, owner_id).await?;
    let existing = find_item(db, item_id).await?;

    if existing.owner_id != owner_id {
        return Err(DomainError::Forbidden(
            "Only the owner can update an item".to_string(),
        ));
    }

    sqlx::query(
        r#"
        UPDATE items SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            available = COALESCE(?, available),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.available)
    .bind(Utc::now())
    .bind(item_id)
    .execute(db)
    .await?;

    info!(item_id = %item_id, "Item updated");
    find_item(db, item_id).await
}

/// Fetch one item with comments; the last/next approved bookings are
/// attached only when the caller owns it.
pub async fn get_by_id(
    db: &DbPool,
    caller_id: &str,
    item_id: &str,
) -> DomainResult<ItemWithDetails> {
    find_user(db, caller_id).await?;
    let item = find_item(db, item_id).await?;

    enrich(db, caller_id, item).await
}

/// All of the owner's items, paginated, oldest first, each enriched with
/// bookings and comments.
pub async fn get_by_owner(
    db: &DbPool,
    owner_id: &str,
    from: i64,
    size: i64,
) -> DomainResult<Vec<ItemWithDetails>> {
    check_pagination(from, size)?;

    let items = sqlx::query_as::<_, Item>(
        "SELECT * FROM items WHERE owner_id = ? ORDER BY created_at ASC LIMIT ? OFFSET ?",
    )
    .bind(owner_id)
    .bind(size)
    .bind(page_offset(from, size))
    .fetch_all(db)
    .await?;

    let mut results = Vec::new();
    for item in items {
        results.push(enrich(db, owner_id, item).await?);
    }
    Ok(results)
}

/// Case-insensitive substring search over name and description, available
/// items only. A blank query short-circuits to an empty list.
pub async fn search(db: &DbPool, text: &str, from: i64, size: i64) -> DomainResult<Vec<Item>> {
    check_pagination(from, size)?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items = sqlx::query_as::<_, Item>(
        r#"
        SELECT * FROM items
        WHERE available = 1
          AND (instr(lower(name), lower(?)) > 0 OR instr(lower(description), lower(?)) > 0)
        ORDER BY created_at ASC LIMIT ? OFFSET ?
        "#,
    )
    .bind(text)
    .bind(text)
    .bind(size)
    .bind(page_offset(from, size))
    .fetch_all(db)
    .await?;

    Ok(items)
}

/// Items offered against a request, oldest first.
pub async fn get_by_request_id(db: &DbPool, request_id: &str) -> DomainResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT * FROM items WHERE request_id = ? ORDER BY created_at ASC",
    )
    .bind(request_id)
    .fetch_all(db)
    .await?;
    Ok(items)
}

/// Add a post-rental review. The author must have a past APPROVED booking
/// on the item.
pub async fn add_comment(
    db: &DbPool,
    author_id: &str,
    item_id: &str,
    req: CreateCommentRequest,
) -> DomainResult<Comment> {
    find_user(db, author_id).await?;
    find_item(db, item_id).await?;

    let past = crate::domain::bookings::get_all_by_booker_id(db, author_id, "PAST", 0, 100).await?;
    let has_rented = past
        .iter()
        .any(|b| b.item_id == item_id && b.status == BookingStatus::Approved);

    if !has_rented {
        return Err(DomainError::Validation(
            "User has not rented this item".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO comments (id, item_id, author_id, text, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(item_id)
    .bind(author_id)
    .bind(&req.text)
    .bind(Utc::now())
    .execute(db)
    .await?;

    info!(item_id = %item_id, author_id = %author_id, "Comment added");

    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(&id)
        .fetch_one(db)
        .await?;
    Ok(comment)
}

/// Fetch an item or fail with NotFound.
pub(crate) async fn find_item(db: &DbPool, item_id: &str) -> DomainResult<Item> {
    sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = ?")
        .bind(item_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            tracing::error!("Item not found: {}", item_id);
            DomainError::NotFound(format!("Item not found: {}", item_id))
        })
}

async fn enrich(db: &DbPool, caller_id: &str, item: Item) -> DomainResult<ItemWithDetails> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE item_id = ? ORDER BY created_at ASC",
    )
    .bind(&item.id)
    .fetch_all(db)
    .await?;

    let (last_booking, next_booking) = if item.owner_id == caller_id {
        booking_slots(db, &item.id).await?
    } else {
        (None, None)
    };

    Ok(ItemWithDetails {
        item,
        last_booking,
        next_booking,
        comments,
    })
}

/// Latest approved booking started before now, and the earliest one
/// starting after it.
async fn booking_slots(
    db: &DbPool,
    item_id: &str,
) -> DomainResult<(Option<BookingShort>, Option<BookingShort>)> {
    let now = Utc::now();

    let last: Option<Booking> = sqlx::query_as(
        r#"
        SELECT * FROM bookings
        WHERE item_id = ? AND status = 'APPROVED' AND start_date < ?
        ORDER BY start_date DESC LIMIT 1
        "#,
    )
    .bind(item_id)
    .bind(now)
    .fetch_optional(db)
    .await?;

    let next: Option<Booking> = sqlx::query_as(
        r#"
        SELECT * FROM bookings
        WHERE item_id = ? AND status = 'APPROVED' AND start_date > ?
        ORDER BY start_date ASC LIMIT 1
        "#,
    )
    .bind(item_id)
    .bind(now)
    .fetch_optional(db)
    .await?;

    Ok((last.map(Into::into), next.map(Into::into)))
}
