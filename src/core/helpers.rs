use spin_sdk::key_value::Store;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use argon2::password_hash::SaltString;
use rand::rngs::OsRng;
use regex::Regex;
use ammonia::Builder;
use uuid::Uuid;
use std::sync::OnceLock;

pub fn store() -> Store {
    Store::open_default().expect("KV store must exist")
}

pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::PasswordHash;

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn validate_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Regex should compile")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Strip every HTML tag, leaving plain text only.
pub fn sanitize_text(text: &str) -> String {
    Builder::default()
        .tags(std::collections::HashSet::new())
        .clean(text)
        .to_string()
}

/// Zero-based segment of a path: `path_segment("/api/posts/42/like", 2)`
/// yields `Some("42")`.
pub fn path_segment(path: &str, index: usize) -> Option<&str> {
    path.trim_start_matches('/').split('/').nth(index)
}

pub fn parse_timestamp(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

/// Read an optional file attachment out of a request body. The four file
/// fields come as a unit; a partial set is a validation error.
pub fn parse_file_attachment(
    body: &serde_json::Value,
) -> Result<Option<crate::models::models::FileAttachment>, crate::core::errors::ApiError> {
    let base64 = body["file_base64"].as_str().unwrap_or_default();
    let mime_type = body["file_mime_type"].as_str().unwrap_or_default();
    let original_name = body["file_original_name"].as_str().unwrap_or_default();
    let kind = body["file_type"].as_str().unwrap_or_default();

    if base64.is_empty() && mime_type.is_empty() && original_name.is_empty() && kind.is_empty() {
        return Ok(None);
    }
    if base64.is_empty() || mime_type.is_empty() || original_name.is_empty() || kind.is_empty() {
        return Err(crate::core::errors::ApiError::BadRequest(
            "File data requires MIME type, original name and file type".to_string(),
        ));
    }

    Ok(Some(crate::models::models::FileAttachment {
        base64: base64.to_string(),
        mime_type: mime_type.to_string(),
        original_name: sanitize_text(original_name),
        kind: kind.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("ravi@bvb.edu"));
        assert!(is_valid_email("a.b+c@kit.ac.in"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@at.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn sanitize_strips_tags() {
        assert_eq!(sanitize_text("<script>x</script>hello"), "hello");
        assert_eq!(sanitize_text("<b>bold</b> text"), "bold text");
    }

    #[test]
    fn path_segments_index_from_root() {
        assert_eq!(path_segment("/api/posts/42/like", 2), Some("42"));
        assert_eq!(path_segment("/api/posts/42/comments/7", 4), Some("7"));
        assert_eq!(path_segment("/api/posts", 2), None);
    }
}
