//! Booking service: creation, approval workflow, state-filtered queries.
//!
//! A booking is created WAITING and is decided exactly once by the item's
//! owner: WAITING -> APPROVED or WAITING -> REJECTED, both terminal.

use chrono::Utc;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use super::items::find_item;
use super::{check_pagination, find_user, page_offset, DomainError, DomainResult};
use crate::db::{Booking, BookingStatus, CreateBookingRequest, DbPool, Item, User};

/// Query filter over a user's bookings, evaluated against "now" at call
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingState {
    type Err = String;

    /// Tokens are case-sensitive; anything else is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("Unknown state: {}", other)),
        }
    }
}

impl BookingState {
    /// WHERE-clause fragment for this state, shared by the booker and the
    /// owner queries so the two call sites cannot drift apart.
    fn filter_sql(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Current => "AND ? BETWEEN b.start_date AND b.end_date",
            Self::Past => "AND b.end_date < ?",
            Self::Future => "AND b.start_date > ?",
            Self::Waiting => "AND b.status = 'WAITING'",
            Self::Rejected => "AND b.status = 'REJECTED'",
        }
    }

    /// Whether the fragment takes a "now" bind parameter.
    fn binds_now(self) -> bool {
        matches!(self, Self::Current | Self::Past | Self::Future)
    }
}

/// Whose bookings a list query scopes to.
enum Scope {
    Booker,
    Owner,
}

/// Create a booking.
///
/// Validation order: requester exists, item exists, item available, start
/// strictly before end, start not in the past, requester is not the owner,
/// and the interval does not overlap an approved booking on the item.
pub async fn add(db: &DbPool, booker_id: &str, req: CreateBookingRequest) -> DomainResult<Booking> {
    let mut tx = db.begin().await?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(booker_id)
        .fetch_optional(&mut *tx)
        .await?;
    if user.is_none() {
        return Err(DomainError::NotFound(format!(
            "User not found: {}",
            booker_id
        )));
    }

    let item: Item = sqlx::query_as("SELECT * FROM items WHERE id = ?")
        .bind(&req.item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Item not found: {}", req.item_id)))?;

    if !item.available {
        return Err(DomainError::Validation(
            "Item is not available for booking".to_string(),
        ));
    }

    crate::api::validation::validate_booking_dates(req.start_date, req.end_date, Utc::now())
        .map_err(DomainError::Validation)?;

    if item.owner_id == booker_id {
        return Err(DomainError::Validation(
            "Owner cannot book their own item".to_string(),
        ));
    }

    // Overlap against approved bookings, half-open [start, end)
    let clash: Option<Booking> = sqlx::query_as(
        r#"
        SELECT * FROM bookings
        WHERE item_id = ? AND status = 'APPROVED'
          AND start_date < ? AND end_date > ?
        LIMIT 1
        "#,
    )
    .bind(&req.item_id)
    .bind(req.end_date)
    .bind(req.start_date)
    .fetch_optional(&mut *tx)
    .await?;

    if clash.is_some() {
        return Err(DomainError::Validation(
            "Item is already booked for this period".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO bookings (id, item_id, booker_id, start_date, end_date, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.item_id)
    .bind(booker_id)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(BookingStatus::Waiting)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(booking_id = %booking.id, item_id = %booking.item_id, "Booking created");
    Ok(booking)
}

/// Decide a WAITING booking. Only the item's owner may decide, and a
/// booking is decided at most once: APPROVED and REJECTED are terminal.
pub async fn update_status(
    db: &DbPool,
    acting_user_id: &str,
    booking_id: &str,
    approved: bool,
) -> DomainResult<Booking> {
    let mut tx = db.begin().await?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(acting_user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if user.is_none() {
        return Err(DomainError::NotFound(format!(
            "User not found: {}",
            acting_user_id
        )));
    }

    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Booking not found: {}", booking_id)))?;

    let item: Item = sqlx::query_as("SELECT * FROM items WHERE id = ?")
        .bind(&booking.item_id)
        .fetch_one(&mut *tx)
        .await?;

    if item.owner_id != acting_user_id {
        return Err(DomainError::Forbidden(
            "Only the item owner can decide a booking".to_string(),
        ));
    }

    if booking.status != BookingStatus::Waiting {
        return Err(DomainError::Validation(
            "Booking is already decided".to_string(),
        ));
    }

    let status = if approved {
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    };

    sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
        .bind(status)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(booking_id = %booking_id, status = %booking.status, "Booking decided");
    Ok(booking)
}

/// Fetch a booking, visible only to its booker or the item's owner.
pub async fn get_by_id(db: &DbPool, caller_id: &str, booking_id: &str) -> DomainResult<Booking> {
    find_user(db, caller_id).await?;

    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Booking not found: {}", booking_id)))?;

    let item = find_item(db, &booking.item_id).await?;

    if booking.booker_id != caller_id && item.owner_id != caller_id {
        return Err(DomainError::Forbidden(
            "No access to this booking".to_string(),
        ));
    }

    Ok(booking)
}

/// Bookings made by the user, filtered by state, newest start first.
pub async fn get_all_by_booker_id(
    db: &DbPool,
    user_id: &str,
    state: &str,
    from: i64,
    size: i64,
) -> DomainResult<Vec<Booking>> {
    get_all_by_state(db, Scope::Booker, user_id, state, from, size).await
}

/// Bookings on the user's items, filtered by state, newest start first.
pub async fn get_all_by_owner_id(
    db: &DbPool,
    user_id: &str,
    state: &str,
    from: i64,
    size: i64,
) -> DomainResult<Vec<Booking>> {
    get_all_by_state(db, Scope::Owner, user_id, state, from, size).await
}

async fn get_all_by_state(
    db: &DbPool,
    scope: Scope,
    user_id: &str,
    state: &str,
    from: i64,
    size: i64,
) -> DomainResult<Vec<Booking>> {
    // The state token is checked before anything touches the database
    let state = BookingState::from_str(state).map_err(DomainError::Validation)?;
    find_user(db, user_id).await?;
    check_pagination(from, size)?;

    let (join, scope_column) = match scope {
        Scope::Booker => ("", "b.booker_id"),
        Scope::Owner => ("JOIN items i ON i.id = b.item_id", "i.owner_id"),
    };

    let sql = format!(
        "SELECT b.* FROM bookings b {} WHERE {} = ? {} \
         ORDER BY b.start_date DESC LIMIT ? OFFSET ?",
        join,
        scope_column,
        state.filter_sql(),
    );

    let mut query = sqlx::query_as::<_, Booking>(&sql).bind(user_id);
    if state.binds_now() {
        query = query.bind(Utc::now());
    }
    let bookings = query
        .bind(size)
        .bind(page_offset(from, size))
        .fetch_all(db)
        .await?;

    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, CreateItemRequest, CreateUserRequest};
    use crate::domain::{items, users};
    use chrono::{DateTime, Duration};

    async fn seed_user(db: &DbPool, name: &str, email: &str) -> User {
        users::add(
            db,
            CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_item(db: &DbPool, owner: &User, name: &str, available: bool) -> Item {
        items::add(
            db,
            &owner.id,
            CreateItemRequest {
                name: name.to_string(),
                description: format!("{} description", name),
                available,
                request_id: None,
            },
        )
        .await
        .unwrap()
    }

    fn booking_req(item: &Item, start_days: i64, end_days: i64) -> CreateBookingRequest {
        let now = Utc::now();
        CreateBookingRequest {
            item_id: item.id.clone(),
            start_date: now + Duration::days(start_days),
            end_date: now + Duration::days(end_days),
        }
    }

    /// Insert a booking directly, bypassing the add() date validation, for
    /// past/current fixtures.
    async fn insert_booking(
        db: &DbPool,
        item: &Item,
        booker: &User,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO bookings (id, item_id, booker_id, start_date, end_date, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&item.id)
        .bind(&booker.id)
        .bind(start)
        .bind(end)
        .bind(status)
        .bind(Utc::now())
        .execute(db)
        .await
        .unwrap();
        id
    }

    #[tokio::test]
    async fn test_add_creates_waiting_booking() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let req = booking_req(&item, 1, 2);
        let booking = add(&db, &booker.id, req.clone()).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.item_id, item.id);
        assert_eq!(booking.booker_id, booker.id);

        // Round-trip by id
        let fetched = get_by_id(&db, &booker.id, &booking.id).await.unwrap();
        assert_eq!(fetched.item_id, req.item_id);
        assert_eq!(fetched.start_date, req.start_date);
        assert_eq!(fetched.end_date, req.end_date);
        assert_eq!(fetched.status, BookingStatus::Waiting);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_dates() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        // start == end
        let mut req = booking_req(&item, 1, 1);
        req.end_date = req.start_date;
        let err = add(&db, &booker.id, req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // start after end
        let err = add(&db, &booker.id, booking_req(&item, 2, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // start in the past
        let err = add(&db, &booker.id, booking_req(&item, -1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_rejects_unavailable_item() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", false).await;

        let err = add(&db, &booker.id, booking_req(&item, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_owner_cannot_book_own_item() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let err = add(&db, &owner.id, booking_req(&item, 1, 2))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("own item")),
            other => panic!("expected Validation, got {:?}", other),
        }

        // Nothing was persisted
        let all = get_all_by_owner_id(&db, &owner.id, "ALL", 0, 10)
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_missing_user_and_item() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let err = add(&db, "ghost", booking_req(&item, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let mut req = booking_req(&item, 1, 2);
        req.item_id = "missing".to_string();
        let err = add(&db, &booker.id, req).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_rejects_overlap_with_approved() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let rival = seed_user(&db, "Carol", "carol@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 3)).await.unwrap();
        update_status(&db, &owner.id, &booking.id, true)
            .await
            .unwrap();

        // Overlapping interval is rejected
        let err = add(&db, &rival.id, booking_req(&item, 2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Back-to-back interval (starts exactly at the other's end) is fine
        add(&db, &rival.id, booking_req(&item, 3, 5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_status_approval_flow() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 2)).await.unwrap();

        let approved = update_status(&db, &owner.id, &booking.id, true)
            .await
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        // One-shot: a second decision fails
        let err = update_status(&db, &owner.id, &booking.id, true)
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("already decided")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_is_terminal() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 2)).await.unwrap();
        update_status(&db, &owner.id, &booking.id, false)
            .await
            .unwrap();

        let err = update_status(&db, &owner.id, &booking.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_status_requires_owner() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 2)).await.unwrap();

        let err = update_status(&db, &booker.id, &booking.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_get_by_id_visibility() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let outsider = seed_user(&db, "Carol", "carol@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 2)).await.unwrap();

        assert!(get_by_id(&db, &booker.id, &booking.id).await.is_ok());
        assert!(get_by_id(&db, &owner.id, &booking.id).await.is_ok());

        let err = get_by_id(&db, &outsider.id, &booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let err = get_by_id(&db, &booker.id, "missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_state_parsing() {
        assert_eq!(BookingState::from_str("ALL").unwrap(), BookingState::All);
        assert_eq!(
            BookingState::from_str("REJECTED").unwrap(),
            BookingState::Rejected
        );
        // Case-sensitive
        assert!(BookingState::from_str("all").is_err());

        let err = BookingState::from_str("BOGUS").unwrap_err();
        assert_eq!(err, "Unknown state: BOGUS");
    }

    #[tokio::test]
    async fn test_unknown_state_fails_before_user_check() {
        let db = test_pool().await;

        // The token is rejected even for a user that does not exist
        let err = get_all_by_booker_id(&db, "ghost", "BOGUS", 0, 10)
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, "Unknown state: BOGUS"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_state_filters_for_booker() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let now = Utc::now();
        let past = insert_booking(
            &db,
            &item,
            &booker,
            now - Duration::days(4),
            now - Duration::days(3),
            BookingStatus::Approved,
        )
        .await;
        let current = insert_booking(
            &db,
            &item,
            &booker,
            now - Duration::days(1),
            now + Duration::days(1),
            BookingStatus::Approved,
        )
        .await;
        let future = insert_booking(
            &db,
            &item,
            &booker,
            now + Duration::days(2),
            now + Duration::days(3),
            BookingStatus::Waiting,
        )
        .await;
        let rejected = insert_booking(
            &db,
            &item,
            &booker,
            now + Duration::days(5),
            now + Duration::days(6),
            BookingStatus::Rejected,
        )
        .await;

        let all = get_all_by_booker_id(&db, &booker.id, "ALL", 0, 10)
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
        // Ordered by start date descending
        assert_eq!(all[0].id, rejected);
        assert_eq!(all[3].id, past);

        let got = get_all_by_booker_id(&db, &booker.id, "CURRENT", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, current);

        let got = get_all_by_booker_id(&db, &booker.id, "PAST", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, past);

        let got = get_all_by_booker_id(&db, &booker.id, "FUTURE", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 3);

        let got = get_all_by_booker_id(&db, &booker.id, "WAITING", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, future);

        let got = get_all_by_booker_id(&db, &booker.id, "REJECTED", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, rejected);
    }

    #[tokio::test]
    async fn test_state_filters_for_owner() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;
        // A booking on someone else's item must not leak into the scope
        let other_owner = seed_user(&db, "Carol", "carol@example.com").await;
        let other_item = seed_item(&db, &other_owner, "Saw", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 2)).await.unwrap();
        add(&db, &booker.id, booking_req(&other_item, 1, 2))
            .await
            .unwrap();

        let got = get_all_by_owner_id(&db, &owner.id, "ALL", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, booking.id);

        let got = get_all_by_owner_id(&db, &owner.id, "WAITING", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);

        let got = get_all_by_owner_id(&db, &owner.id, "PAST", 0, 10)
            .await
            .unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn test_becomes_past_after_end_date() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        let booking = add(&db, &booker.id, booking_req(&item, 1, 2)).await.unwrap();
        update_status(&db, &owner.id, &booking.id, true)
            .await
            .unwrap();

        // Before the start date: not in PAST
        let got = get_all_by_booker_id(&db, &booker.id, "PAST", 0, 10)
            .await
            .unwrap();
        assert!(got.is_empty());

        // Shift the interval behind "now": it shows up in PAST
        let now = Utc::now();
        sqlx::query("UPDATE bookings SET start_date = ?, end_date = ? WHERE id = ?")
            .bind(now - Duration::days(2))
            .bind(now - Duration::days(1))
            .bind(&booking.id)
            .execute(&db)
            .await
            .unwrap();

        let got = get_all_by_booker_id(&db, &booker.id, "PAST", 0, 10)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, booking.id);
    }

    #[tokio::test]
    async fn test_pagination_validation_and_paging() {
        let db = test_pool().await;
        let owner = seed_user(&db, "Alice", "alice@example.com").await;
        let booker = seed_user(&db, "Bob", "bob@example.com").await;
        let item = seed_item(&db, &owner, "Drill", true).await;

        for i in 0..5 {
            add(&db, &booker.id, booking_req(&item, 10 + i, 20 + i))
                .await
                .unwrap();
        }

        let err = get_all_by_booker_id(&db, &booker.id, "ALL", -1, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = get_all_by_booker_id(&db, &booker.id, "ALL", 0, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let first = get_all_by_booker_id(&db, &booker.id, "ALL", 0, 2)
            .await
            .unwrap();
        assert_eq!(first.len(), 2);
        let second = get_all_by_booker_id(&db, &booker.id, "ALL", 2, 2)
            .await
            .unwrap();
        assert_eq!(second.len(), 2);
        assert_ne!(first[0].id, second[0].id);

        let last = get_all_by_booker_id(&db, &booker.id, "ALL", 4, 2)
            .await
            .unwrap();
        assert_eq!(last.len(), 1);
    }
}
