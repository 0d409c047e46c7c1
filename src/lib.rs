use spin_sdk::http::{Request, Response};
#[cfg(target_arch = "wasm32")]
use spin_sdk::{http::IntoResponse, http_component};

pub mod auth;
pub mod config;
pub mod core;
pub mod deadlines;
pub mod groups;
pub mod models;
pub mod notes;
pub mod posts;
pub mod users;

fn not_found() -> anyhow::Result<Response> {
    Ok(Response::builder()
        .status(404)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"error": "No route found"}))?)
        .build())
}

fn health() -> anyhow::Result<Response> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"message": "Backend is healthy!"}))?)
        .build())
}

/// Dispatch a request to its handler. Shared by the Spin component below and
/// the native actix adapter in `src/bin/main.rs`.
pub fn route(req: Request) -> anyhow::Result<Response> {
    let path = req.path().to_string();
    let method = req.method().to_string();

    match (method.as_str(), path.as_str()) {
        ("POST", "/api/auth/signup") => auth::signup(req),
        ("POST", "/api/auth/login") => auth::login(req),
        ("POST", "/api/auth/logout") => auth::logout(req),
        ("GET", "/api/auth/me") => auth::me(req),
        ("PUT", "/api/auth/profile") => auth::update_profile(req),

        ("GET", "/api/users/search") => users::search_users(req),
        ("POST", p) if p.starts_with("/api/users/") && p.ends_with("/follow") => {
            users::follow(req)
        }
        ("POST", p) if p.starts_with("/api/users/") && p.ends_with("/unfollow") => {
            users::unfollow(req)
        }

        ("POST", "/api/posts") => posts::create_post(req),
        ("GET", "/api/posts") => posts::list_posts(req),
        ("POST", p) if p.starts_with("/api/posts/") && p.ends_with("/like") => {
            posts::toggle_like(req)
        }
        ("POST", p) if p.starts_with("/api/posts/") && p.ends_with("/comments") => {
            posts::add_comment(req)
        }
        ("GET", p) if p.starts_with("/api/posts/") && p.ends_with("/comments") => {
            posts::list_comments(req)
        }
        ("DELETE", p) if p.starts_with("/api/posts/") && p.contains("/comments/") => {
            posts::delete_comment(req)
        }
        ("DELETE", p) if p.starts_with("/api/posts/") => posts::delete_post(req),

        ("POST", "/api/notes") => notes::create_note(req),
        ("GET", "/api/notes") => notes::list_notes(req),
        ("PUT", p) if p.starts_with("/api/notes/") => notes::update_note(req),
        ("DELETE", p) if p.starts_with("/api/notes/") => notes::delete_note(req),

        ("POST", "/api/deadlines") => deadlines::create_deadline(req),
        ("GET", "/api/deadlines") => deadlines::list_deadlines(req),
        ("DELETE", p) if p.starts_with("/api/deadlines/") => deadlines::delete_deadline(req),

        ("POST", "/api/groups") => groups::create_group(req),
        ("GET", "/api/groups") => groups::list_groups(req),
        ("POST", p) if p.starts_with("/api/groups/") && p.ends_with("/join") => {
            groups::join_group(req)
        }
        ("POST", p) if p.starts_with("/api/groups/") && p.ends_with("/leave") => {
            groups::leave_group(req)
        }
        ("POST", p) if p.starts_with("/api/groups/") && p.ends_with("/messages") => {
            groups::post_message(req)
        }
        ("GET", p) if p.starts_with("/api/groups/") && p.ends_with("/messages") => {
            groups::list_messages(req)
        }
        ("DELETE", p) if p.starts_with("/api/groups/") && p.contains("/messages/") => {
            groups::delete_message(req)
        }
        ("DELETE", p) if p.starts_with("/api/groups/") => groups::delete_group(req),

        ("GET", "/api/health") => health(),
        _ => not_found(),
    }
}

#[cfg(target_arch = "wasm32")]
#[http_component]
fn handle(req: Request) -> anyhow::Result<impl IntoResponse> {
    let _ = crate::core::db::init_demo_data(&crate::core::helpers::store()); // Seed on first request
    route(req)
}
