use spin_sdk::http::{Request, Response};
use crate::models::models::User;
use crate::core::helpers::{store, validate_uuid, path_segment};
use crate::core::errors::ApiError;
use crate::core::query_params::{parse_query_params, get_string};
use crate::auth::authenticated_user;
use crate::config::*;

/// GET /api/users/search?query=: substring match on name or email,
/// excluding the caller. Each hit carries `is_following` relative to the
/// caller.
pub fn search_users(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let params = parse_query_params(req.uri());
    let query = match get_string(&params, "query") {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return Ok(ApiError::BadRequest("Search query is required".to_string()).into()),
    };

    let store = store();
    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();

    let mut results = Vec::new();
    for id in users {
        if id == caller.id {
            continue;
        }
        if let Some(u) = store.get_json::<User>(&user_key(&id))? {
            if u.name.to_lowercase().contains(&query) || u.email.to_lowercase().contains(&query) {
                results.push(serde_json::json!({
                    "id": u.id,
                    "name": u.name,
                    "email": u.email,
                    "course": u.course,
                    "college": u.college,
                    "post_count": u.post_count,
                    "followers_count": u.followers_count,
                    "is_following": caller.following.contains(&u.id),
                }));
            }
        }
    }

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"users": results}))?)
        .build())
}

/// POST /api/users/{id}/follow
pub fn follow(req: Request) -> anyhow::Result<Response> {
    let mut caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let target_id = path_segment(req.path(), 2).unwrap_or("").to_string();
    if target_id.is_empty() || !validate_uuid(&target_id) {
        return Ok(ApiError::BadRequest("Invalid target user".to_string()).into());
    }
    if target_id == caller.id {
        return Ok(ApiError::BadRequest("You cannot follow yourself".to_string()).into());
    }

    let store = store();
    let mut target = match store.get_json::<User>(&user_key(&target_id))? {
        Some(u) => u,
        None => return Ok(ApiError::NotFound("User not found".to_string()).into()),
    };

    if caller.following.contains(&target_id) {
        return Ok(ApiError::Conflict("You are already following this user".to_string()).into());
    }

    caller.following.insert(0, target_id.clone());
    store.set_json(&user_key(&caller.id), &caller)?;

    // The followee's counter is a second view of the same relationship,
    // maintained only alongside the set mutation above.
    target.followers_count += 1;
    store.set_json(&user_key(&target_id), &target)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "User followed successfully",
            "user_id": target_id,
            "followers_count": target.followers_count,
        }))?)
        .build())
}

/// POST /api/users/{id}/unfollow
pub fn unfollow(req: Request) -> anyhow::Result<Response> {
    let mut caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let target_id = path_segment(req.path(), 2).unwrap_or("").to_string();
    if target_id.is_empty() || !validate_uuid(&target_id) {
        return Ok(ApiError::BadRequest("Invalid target user".to_string()).into());
    }

    let store = store();
    let mut target = match store.get_json::<User>(&user_key(&target_id))? {
        Some(u) => u,
        None => return Ok(ApiError::NotFound("User not found".to_string()).into()),
    };

    if !caller.following.contains(&target_id) {
        return Ok(ApiError::Conflict("You are not following this user".to_string()).into());
    }

    caller.following.retain(|id| id != &target_id);
    store.set_json(&user_key(&caller.id), &caller)?;

    target.followers_count = target.followers_count.saturating_sub(1);
    store.set_json(&user_key(&target_id), &target)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "User unfollowed successfully",
            "user_id": target_id,
            "followers_count": target.followers_count,
        }))?)
        .build())
}
