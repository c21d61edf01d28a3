//! Input validation for API requests.
//!
//! Field-level validators return `Result<(), String>` and are aggregated
//! into a single 400 response via the `ValidationErrorBuilder` from the
//! `error` module. The gateway binary runs these same rules at the edge
//! before anything reaches the core server.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating email addresses
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9][-a-zA-Z0-9]*(\.[a-zA-Z0-9][-a-zA-Z0-9]*)+$"
    ).unwrap();
}

/// Validate a user name
pub fn validate_user_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if name.len() > 255 {
        return Err("Name is too long (max 255 characters)".to_string());
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 512 {
        return Err("Email is too long (max 512 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate an item name
pub fn validate_item_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Item name is required".to_string());
    }

    if name.len() > 255 {
        return Err("Item name is too long (max 255 characters)".to_string());
    }

    Ok(())
}

/// Validate an item or request description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Description is required".to_string());
    }

    if description.len() > 2000 {
        return Err("Description is too long (max 2000 characters)".to_string());
    }

    Ok(())
}

/// Validate a comment text
pub fn validate_comment_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Comment text is required".to_string());
    }

    if text.len() > 2000 {
        return Err("Comment text is too long (max 2000 characters)".to_string());
    }

    Ok(())
}

/// Validate a booking interval against the given current time.
///
/// Start must be strictly before end and must not lie in the past.
pub fn validate_booking_dates(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), String> {
    if start >= end {
        return Err("Booking start date must precede the end date".to_string());
    }

    if start < now {
        return Err("Booking start date must not be in the past".to_string());
    }

    Ok(())
}

/// Validate pagination parameters.
///
/// `from` is an item offset (zero-based), `size` a page length. `size`
/// must be at least 1 since the offset is converted to a page index by
/// integer division.
pub fn validate_pagination(from: i64, size: i64) -> Result<(), String> {
    if from < 0 {
        return Err("Page offset must not be negative".to_string());
    }

    if size < 1 {
        return Err("Page size must be at least 1".to_string());
    }

    Ok(())
}

/// Validate a UUID string
pub fn validate_uuid(id: &str, field_name: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} is required", field_name));
    }

    if uuid::Uuid::parse_str(id).is_err() {
        return Err(format!("Invalid {} format", field_name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("Alice").is_ok());

        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
        assert!(validate_user_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_item_fields() {
        assert!(validate_item_name("Cordless drill").is_ok());
        assert!(validate_item_name("").is_err());

        assert!(validate_description("18V, two batteries").is_ok());
        assert!(validate_description(" ").is_err());
    }

    #[test]
    fn test_validate_comment_text() {
        assert!(validate_comment_text("Worked great").is_ok());
        assert!(validate_comment_text("").is_err());
        assert!(validate_comment_text(&"x".repeat(2001)).is_err());
    }

    #[test]
    fn test_validate_booking_dates() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        let end = now + Duration::days(2);

        assert!(validate_booking_dates(start, end, now).is_ok());
        // start == end is rejected
        assert!(validate_booking_dates(start, start, now).is_err());
        // start after end
        assert!(validate_booking_dates(end, start, now).is_err());
        // start in the past
        assert!(validate_booking_dates(now - Duration::hours(1), end, now).is_err());
    }

    #[test]
    fn test_validate_pagination() {
        assert!(validate_pagination(0, 10).is_ok());
        assert!(validate_pagination(20, 10).is_ok());

        assert!(validate_pagination(-1, 10).is_err());
        assert!(validate_pagination(0, 0).is_err());
        assert!(validate_pagination(0, -5).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000", "item_id").is_ok());
        assert!(validate_uuid("", "item_id").is_err());
        assert!(validate_uuid("not-a-uuid", "item_id").is_err());
    }
}
