//! Two-state membership flip shared by post likes and group membership.
//!
//! The set is the source of truth: callers derive any paired counter from
//! `set.len()` inside the same document write, so the two cannot drift apart
//! within a single store operation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Flip `actor` in and out of `set`. Present gets removed, absent gets
/// appended; the set never holds an actor twice.
pub fn toggle(set: &mut Vec<String>, actor: &str) -> Toggle {
    if set.iter().any(|m| m == actor) {
        set.retain(|m| m != actor);
        Toggle::Removed
    } else {
        set.push(actor.to_string());
        Toggle::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_actor_gets_added() {
        let mut set = vec!["u1".to_string()];
        assert_eq!(toggle(&mut set, "u2"), Toggle::Added);
        assert_eq!(set, vec!["u1".to_string(), "u2".to_string()]);
    }

    #[test]
    fn present_actor_gets_removed() {
        let mut set = vec!["u1".to_string(), "u2".to_string()];
        assert_eq!(toggle(&mut set, "u1"), Toggle::Removed);
        assert_eq!(set, vec!["u2".to_string()]);
    }

    #[test]
    fn double_toggle_round_trips() {
        let mut set = vec!["u1".to_string()];
        let before = set.clone();
        toggle(&mut set, "u2");
        toggle(&mut set, "u2");
        assert_eq!(set, before);
    }

    #[test]
    fn removal_clears_duplicates_if_any() {
        // A set holding an actor twice still converges on removal.
        let mut set = vec!["u1".to_string(), "u1".to_string()];
        assert_eq!(toggle(&mut set, "u1"), Toggle::Removed);
        assert!(set.is_empty());
    }
}
