//! Domain services: validation and orchestration per entity.
//!
//! Each service is a module of async functions over the database pool.
//! Handlers stay thin; everything the HTTP layer should not know about
//! lives here.

pub mod bookings;
mod error;
pub mod items;
pub mod requests;
pub mod users;

pub use error::DomainError;

use crate::api::validation::validate_pagination;
use crate::db::{DbPool, User};

pub type DomainResult<T> = Result<T, DomainError>;

/// Convert an item offset into a row offset via a page index.
///
/// `from` is interpreted as an offset that is expected to be a multiple of
/// `size`: the page is `from / size` (0 when `from` is 0), and rows are
/// skipped page-wise. Callers passing unaligned offsets get the whole
/// containing page. Compatibility quirk, kept deliberately.
pub(crate) fn page_offset(from: i64, size: i64) -> i64 {
    let page = if from > 0 { from / size } else { 0 };
    page * size
}

pub(crate) fn check_pagination(from: i64, size: i64) -> DomainResult<()> {
    validate_pagination(from, size).map_err(DomainError::Validation)
}

/// Fetch a user or fail with NotFound. Shared by every service.
pub(crate) async fn find_user(db: &DbPool, user_id: &str) -> DomainResult<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            tracing::error!("User not found: {}", user_id);
            DomainError::NotFound(format!("User not found: {}", user_id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(0, 10), 0);
        assert_eq!(page_offset(10, 10), 10);
        assert_eq!(page_offset(20, 10), 20);
        // Unaligned offsets snap to the containing page
        assert_eq!(page_offset(5, 10), 0);
        assert_eq!(page_offset(15, 10), 10);
    }
}
