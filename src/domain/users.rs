//! User service: sign-up, partial update, lookup, hard delete.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{find_user, DomainError, DomainResult};
use crate::db::{CreateUserRequest, DbPool, UpdateUserRequest, User};

/// Create a user. The email must not already be registered.
pub async fn add(db: &DbPool, req: CreateUserRequest) -> DomainResult<User> {
    check_email_free(db, &req.email).await?;

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(now)
    .bind(now)
    .execute(db)
    .await
    .map_err(|e| {
        // The UNIQUE column catches inserts racing past the pre-check
        if e.to_string().contains("UNIQUE constraint failed") {
            DomainError::Conflict("Email is already registered".to_string())
        } else {
            DomainError::Database(e)
        }
    })?;

    info!(user_id = %id, "User created");
    find_user(db, &id).await
}

/// Partial update: only the fields present in the request overwrite the
/// stored ones. An email change is re-checked for uniqueness.
pub async fn update(db: &DbPool, user_id: &str, req: UpdateUserRequest) -> DomainResult<User> {
    let existing = find_user(db, user_id).await?;

    if let Some(ref email) = req.email {
        if email != &existing.email {
            check_email_free(db, email).await?;
        }
    }

    sqlx::query(
        r#"
        UPDATE users SET
            name = COALESCE(?, name),
            email = COALESCE(?, email),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(Utc::now())
    .bind(user_id)
    .execute(db)
    .await?;

    info!(user_id = %user_id, "User updated");
    find_user(db, user_id).await
}

pub async fn get_by_id(db: &DbPool, user_id: &str) -> DomainResult<User> {
    find_user(db, user_id).await
}

pub async fn get_all(db: &DbPool) -> DomainResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
        .fetch_all(db)
        .await?;
    Ok(users)
}

/// Hard delete. Owned items, their bookings and comments, and the user's
/// requests go with it (ON DELETE CASCADE).
pub async fn delete(db: &DbPool, user_id: &str) -> DomainResult<User> {
    let user = find_user(db, user_id).await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(db)
        .await?;

    info!(user_id = %user_id, "User deleted");
    Ok(user)
}

async fn check_email_free(db: &DbPool, email: &str) -> DomainResult<()> {
    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await?;

    if existing.is_some() {
        return Err(DomainError::Conflict(
            "Email is already registered".to_string(),
        ));
    }

    Ok(())
}
