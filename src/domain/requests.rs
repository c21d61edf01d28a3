//! Item-request service: open calls for items, with the items offered
//! against them joined in on the read paths.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{check_pagination, find_user, page_offset, DomainError, DomainResult};
use crate::db::{CreateRequestBody, DbPool, ItemRequest, RequestWithItems};

pub async fn add(db: &DbPool, requestor_id: &str, req: CreateRequestBody) -> DomainResult<ItemRequest> {
    find_user(db, requestor_id).await?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO requests (id, requestor_id, description, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(requestor_id)
    .bind(&req.description)
    .bind(Utc::now())
    .execute(db)
    .await?;

    info!(request_id = %id, requestor_id = %requestor_id, "Request created");

    let request = sqlx::query_as::<_, ItemRequest>("SELECT * FROM requests WHERE id = ?")
        .bind(&id)
        .fetch_one(db)
        .await?;
    Ok(request)
}

/// The caller's own requests, oldest first, each with its offered items.
pub async fn get_all_by_requestor(db: &DbPool, user_id: &str) -> DomainResult<Vec<RequestWithItems>> {
    find_user(db, user_id).await?;

    let requests = sqlx::query_as::<_, ItemRequest>(
        "SELECT * FROM requests WHERE requestor_id = ? ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    with_items(db, requests).await
}

/// Everyone else's requests, paginated, oldest first.
pub async fn get_all_from_others(
    db: &DbPool,
    user_id: &str,
    from: i64,
    size: i64,
) -> DomainResult<Vec<RequestWithItems>> {
    find_user(db, user_id).await?;
    check_pagination(from, size)?;

    let requests = sqlx::query_as::<_, ItemRequest>(
        "SELECT * FROM requests WHERE requestor_id != ? ORDER BY created_at ASC LIMIT ? OFFSET ?",
    )
    .bind(user_id)
    .bind(size)
    .bind(page_offset(from, size))
    .fetch_all(db)
    .await?;

    with_items(db, requests).await
}

pub async fn get_by_id(db: &DbPool, user_id: &str, request_id: &str) -> DomainResult<RequestWithItems> {
    find_user(db, user_id).await?;

    let request = sqlx::query_as::<_, ItemRequest>("SELECT * FROM requests WHERE id = ?")
        .bind(request_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            tracing::error!("Request not found: {}", request_id);
            DomainError::NotFound(format!("Request not found: {}", request_id))
        })?;

    let items = super::items::get_by_request_id(db, request_id).await?;
    Ok(RequestWithItems { request, items })
}

async fn with_items(db: &DbPool, requests: Vec<ItemRequest>) -> DomainResult<Vec<RequestWithItems>> {
    let mut results = Vec::new();
    for request in requests {
        let items = super::items::get_by_request_id(db, &request.id).await?;
        results.push(RequestWithItems { request, items });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, CreateItemRequest, CreateUserRequest, User};
    use crate::domain::{items, users};

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

    fn request_body(description: &str) -> CreateRequestBody {
        CreateRequestBody {
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let db = test_pool().await;
        let user = seed_user(&db, "Alice", "alice@example.com").await;

        let request = add(&db, &user.id, request_body("Need a ladder")).await.unwrap();
        assert_eq!(request.requestor_id, user.id);

        let fetched = get_by_id(&db, &user.id, &request.id).await.unwrap();
        assert_eq!(fetched.request.description, "Need a ladder");
        assert!(fetched.items.is_empty());
    }

    #[tokio::test]
    async fn test_add_requires_existing_user() {
        let db = test_pool().await;
        let err = add(&db, "ghost", request_body("Need a ladder"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fulfilling_items_are_joined() {
        let db = test_pool().await;
        let requestor = seed_user(&db, "Alice", "alice@example.com").await;
        let owner = seed_user(&db, "Bob", "bob@example.com").await;

        let request = add(&db, &requestor.id, request_body("Need a ladder"))
            .await
            .unwrap();

        items::add(
            &db,
            &owner.id,
            CreateItemRequest {
                name: "Step ladder".to_string(),
                description: "3 meters".to_string(),
                available: true,
                request_id: Some(request.id.clone()),
            },
        )
        .await
        .unwrap();

        let fetched = get_by_id(&db, &requestor.id, &request.id).await.unwrap();
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.items[0].name, "Step ladder");

        let own = get_all_by_requestor(&db, &requestor.id).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_from_others_excludes_own() {
        let db = test_pool().await;
        let alice = seed_user(&db, "Alice", "alice@example.com").await;
        let bob = seed_user(&db, "Bob", "bob@example.com").await;

        add(&db, &alice.id, request_body("Need a ladder")).await.unwrap();
        add(&db, &bob.id, request_body("Need a drill")).await.unwrap();

        let seen_by_alice = get_all_from_others(&db, &alice.id, 0, 10).await.unwrap();
        assert_eq!(seen_by_alice.len(), 1);
        assert_eq!(seen_by_alice[0].request.description, "Need a drill");

        let err = get_all_from_others(&db, &alice.id, 0, 0).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_request_not_found() {
        let db = test_pool().await;
        let user = seed_user(&db, "Alice", "alice@example.com").await;

        let err = get_by_id(&db, &user.id, "missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
