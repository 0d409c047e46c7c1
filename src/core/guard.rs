//! Ownership and membership predicates applied before every mutating or
//! access-restricted operation. Callers pass the ids recorded on the stored
//! document; the caller id is an opaque string compared only for equality.

use crate::core::errors::ApiError;

/// The caller must be the recorded owner/creator of the resource.
pub fn require_owner(owner_id: &str, caller_id: &str) -> Result<(), ApiError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// The caller must be one of two owners, e.g. the comment author or the
/// parent post's owner, the message sender or the group creator.
pub fn require_either_owner(a: &str, b: &str, caller_id: &str) -> Result<(), ApiError> {
    if a == caller_id || b == caller_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// The caller must appear in the member set.
pub fn require_member(members: &[String], caller_id: &str) -> Result<(), ApiError> {
    if members.iter().any(|m| m == caller_id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_check_matches_exact_id() {
        assert!(require_owner("u1", "u1").is_ok());
        assert!(matches!(require_owner("u1", "u2"), Err(ApiError::Forbidden)));
    }

    #[test]
    fn either_owner_accepts_both_sides() {
        assert!(require_either_owner("author", "post_owner", "author").is_ok());
        assert!(require_either_owner("author", "post_owner", "post_owner").is_ok());
        assert!(matches!(
            require_either_owner("author", "post_owner", "stranger"),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn member_check_scans_the_set() {
        let members = vec!["u1".to_string(), "u2".to_string()];
        assert!(require_member(&members, "u2").is_ok());
        assert!(matches!(require_member(&members, "u3"), Err(ApiError::Forbidden)));
        assert!(matches!(require_member(&[], "u1"), Err(ApiError::Forbidden)));
    }
}
