// Env-driven knobs, field limits and document-key builders shared by every
// handler module.

pub fn token_expiration_hours() -> i64 {
    std::env::var("CAMPUSHUB_TOKEN_EXPIRATION_HOURS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(24)
}

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_COURSE_LENGTH: usize = 100;
pub const MAX_COLLEGE_LENGTH: usize = 50;

pub const MAX_POST_TITLE_LENGTH: usize = 200;
pub const MAX_POST_LENGTH: usize = 5000;
pub const MAX_COMMENT_LENGTH: usize = 1000;

pub const MAX_NOTE_TITLE_LENGTH: usize = 100;
pub const MAX_NOTE_LENGTH: usize = 2000;

pub const MAX_DEADLINE_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

pub const MAX_GROUP_NAME_LENGTH: usize = 100;
pub const MAX_MESSAGE_LENGTH: usize = 2000;

// Index keys. Each holds a JSON list of document ids, newest first where
// ordering matters.
pub const USERS_LIST_KEY: &str = "users_list";
pub const POSTS_FEED_KEY: &str = "posts_feed";
pub const DEADLINES_LIST_KEY: &str = "deadlines_list";
pub const GROUPS_LIST_KEY: &str = "groups_list";
pub const TOKENS_LIST_KEY: &str = "tokens_list";

pub fn user_key(id: &str) -> String {
    format!("user:{}", id)
}

pub fn post_key(id: &str) -> String {
    format!("post:{}", id)
}

pub fn note_key(id: &str) -> String {
    format!("note:{}", id)
}

/// Per-user index of note ids, most recently updated first.
pub fn user_notes_key(user_id: &str) -> String {
    format!("notes:{}", user_id)
}

pub fn deadline_key(id: &str) -> String {
    format!("deadline:{}", id)
}

pub fn group_key(id: &str) -> String {
    format!("group:{}", id)
}

pub fn token_key(token: &str) -> String {
    format!("token:{}", token)
}
