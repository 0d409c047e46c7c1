use spin_sdk::http::{Request, Response};
use uuid::Uuid;
use crate::models::models::{Deadline, DeadlineKind};
use crate::core::helpers::{store, now_iso, validate_uuid, sanitize_text, path_segment, parse_timestamp};
use crate::core::errors::ApiError;
use crate::core::guard::require_owner;
use crate::core::query_params::{parse_query_params, get_bool_flag};
use crate::auth::authenticated_user;
use crate::config::*;

pub fn create_deadline(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let title = body["title"].as_str().unwrap_or_default().trim();
    let description = body["description"].as_str().unwrap_or_default().trim();
    let due_date_str = body["due_date"].as_str().unwrap_or_default();
    let kind_str = body["type"].as_str().unwrap_or_default();

    if title.is_empty() || due_date_str.is_empty() || kind_str.is_empty() {
        return Ok(ApiError::BadRequest(
            "Title, due date and type are required for a deadline".to_string(),
        ).into());
    }
    if title.len() > MAX_DEADLINE_TITLE_LENGTH || description.len() > MAX_DESCRIPTION_LENGTH {
        return Ok(ApiError::BadRequest("Field too long".to_string()).into());
    }
    let kind = match DeadlineKind::parse(kind_str) {
        Some(k) => k,
        None => return Ok(ApiError::BadRequest("Invalid deadline type".to_string()).into()),
    };
    let due_date = match parse_timestamp(due_date_str) {
        Some(dt) => dt.to_rfc3339(),
        None => return Ok(ApiError::BadRequest("Invalid due date".to_string()).into()),
    };

    let store = store();
    let id = Uuid::new_v4().to_string();
    let deadline = Deadline {
        id: id.clone(),
        user_id: caller.id.clone(),
        title: sanitize_text(title),
        description: sanitize_text(description),
        due_date,
        kind,
        is_public: body["is_public"].as_bool().unwrap_or(false),
        // College comes from the owner, never from the request.
        college: caller.college,
        created_at: now_iso(),
    };

    store.set_json(&deadline_key(&id), &deadline)?;

    let mut index: Vec<String> = store.get_json(DEADLINES_LIST_KEY)?.unwrap_or_default();
    index.insert(0, id);
    store.set_json(DEADLINES_LIST_KEY, &index)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Deadline created successfully",
            "deadline": deadline,
        }))?)
        .build())
}

/// GET /api/deadlines: the caller's own deadlines plus public deadlines in
/// the caller's college; `?mine=true` restricts to the caller's own.
/// Ordered soonest-due first, ties newest-created first.
pub fn list_deadlines(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let params = parse_query_params(req.uri());
    let mine_only = get_bool_flag(&params, "mine");

    let store = store();
    let index: Vec<String> = store.get_json(DEADLINES_LIST_KEY)?.unwrap_or_default();

    let mut deadlines = Vec::new();
    for id in index.iter() {
        if let Some(d) = store.get_json::<Deadline>(&deadline_key(id))? {
            let keep = if mine_only {
                d.user_id == caller.id
            } else {
                d.user_id == caller.id || (d.is_public && d.college == caller.college)
            };
            if keep {
                deadlines.push(d);
            }
        }
    }

    deadlines.sort_by(|a, b| {
        let due_a = parse_timestamp(&a.due_date);
        let due_b = parse_timestamp(&b.due_date);
        due_a
            .cmp(&due_b)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"deadlines": deadlines}))?)
        .build())
}

/// DELETE /api/deadlines/{id}: owner only.
pub fn delete_deadline(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let deadline_id = path_segment(req.path(), 2).unwrap_or("");
    if deadline_id.is_empty() || !validate_uuid(deadline_id) {
        return Ok(ApiError::BadRequest("Deadline ID required".to_string()).into());
    }

    let store = store();
    let deadline = match store.get_json::<Deadline>(&deadline_key(deadline_id))? {
        Some(d) => d,
        None => return Ok(ApiError::NotFound("Deadline not found".to_string()).into()),
    };

    if let Err(e) = require_owner(&deadline.user_id, &caller.id) {
        return Ok(e.into());
    }

    store.delete(&deadline_key(deadline_id))?;

    let mut index: Vec<String> = store.get_json(DEADLINES_LIST_KEY)?.unwrap_or_default();
    index.retain(|id| id != deadline_id);
    store.set_json(DEADLINES_LIST_KEY, &index)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Deadline removed successfully"
        }))?)
        .build())
}
