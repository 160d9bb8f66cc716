use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email regex: {e}"))
});

pub const INVALID_EMAIL: &str = "Invalid email format";
const MAX_EMAIL_LEN: usize = 254;

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field: blank is fine, long is not.
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Cap a list field's entry count and the length of each entry.
pub fn validate_items(items: &[String], field_name: &str, max_items: usize, max_len: usize) -> Option<String> {
    if items.len() > max_items {
        return Some(format!("{field_name} can hold at most {max_items} entries"));
    }
    if items.iter().any(|i| i.chars().count() > max_len) {
        return Some(format!("{field_name} entries must be at most {max_len} characters"));
    }
    None
}

/// Validate a required email address against the dashboard's email pattern.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > MAX_EMAIL_LEN {
        return Some(format!("Email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Some(INVALID_EMAIL.to_string());
    }
    None
}

/// A list field that must hold at least one entry.
pub fn validate_non_empty(items: &[String], message: &str) -> Option<String> {
    if items.iter().all(|i| i.trim().is_empty()) {
        return Some(message.to_string());
    }
    None
}

/// Validate a `YYYY-MM-DD` date.
pub fn validate_date(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
        return Some(format!("{field_name} must be a date (YYYY-MM-DD)"));
    }
    None
}
