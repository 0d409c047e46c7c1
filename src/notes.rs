use spin_sdk::http::{Request, Response};
use uuid::Uuid;
use crate::models::models::Note;
use crate::core::helpers::{store, now_iso, validate_uuid, sanitize_text, path_segment};
use crate::core::errors::ApiError;
use crate::core::guard::require_owner;
use crate::auth::authenticate;
use crate::config::*;

fn parse_tags(value: &serde_json::Value) -> Option<Vec<String>> {
    value.as_array().map(|arr| {
        arr.iter()
            .filter_map(|t| t.as_str())
            .map(|t| sanitize_text(t.trim()).to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    })
}

pub fn create_note(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let title = body["title"].as_str().unwrap_or_default().trim();
    let content = body["content"].as_str().unwrap_or_default().trim();

    if title.is_empty() || content.is_empty() {
        return Ok(ApiError::BadRequest(
            "Title and content are required for a note".to_string(),
        ).into());
    }
    if title.len() > MAX_NOTE_TITLE_LENGTH || content.len() > MAX_NOTE_LENGTH {
        return Ok(ApiError::BadRequest("Note too long".to_string()).into());
    }

    let store = store();
    let id = Uuid::new_v4().to_string();
    let now = now_iso();
    let note = Note {
        id: id.clone(),
        user_id: user_id.clone(),
        title: sanitize_text(title),
        content: sanitize_text(content),
        tags: parse_tags(&body["tags"]).unwrap_or_default(),
        created_at: now.clone(),
        updated_at: now,
    };

    store.set_json(&note_key(&id), &note)?;

    let mut index: Vec<String> = store.get_json(&user_notes_key(&user_id))?.unwrap_or_default();
    index.insert(0, id);
    store.set_json(&user_notes_key(&user_id), &index)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Note created successfully",
            "note": note,
        }))?)
        .build())
}

/// GET /api/notes: the caller's notes only, most recently updated first.
pub fn list_notes(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let store = store();
    let index: Vec<String> = store.get_json(&user_notes_key(&user_id))?.unwrap_or_default();

    let mut notes = Vec::new();
    for id in index.iter() {
        if let Some(n) = store.get_json::<Note>(&note_key(id))? {
            notes.push(n);
        }
    }
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"notes": notes}))?)
        .build())
}

/// PUT /api/notes/{id}: owner only; partial update, tags may be cleared by
/// sending an empty array.
pub fn update_note(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let note_id = path_segment(req.path(), 2).unwrap_or("");
    if note_id.is_empty() || !validate_uuid(note_id) {
        return Ok(ApiError::BadRequest("Note ID required".to_string()).into());
    }

    let store = store();
    let mut note = match store.get_json::<Note>(&note_key(note_id))? {
        Some(n) => n,
        None => return Ok(ApiError::NotFound("Note not found".to_string()).into()),
    };

    if let Err(e) = require_owner(&note.user_id, &user_id) {
        return Ok(e.into());
    }

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    if let Some(title) = body["title"].as_str() {
        let title = title.trim();
        if title.is_empty() || title.len() > MAX_NOTE_TITLE_LENGTH {
            return Ok(ApiError::BadRequest("Invalid title".to_string()).into());
        }
        note.title = sanitize_text(title);
    }
    if let Some(content) = body["content"].as_str() {
        let content = content.trim();
        if content.is_empty() || content.len() > MAX_NOTE_LENGTH {
            return Ok(ApiError::BadRequest("Invalid content".to_string()).into());
        }
        note.content = sanitize_text(content);
    }
    if let Some(tags) = parse_tags(&body["tags"]) {
        note.tags = tags;
    }

    note.updated_at = now_iso();
    store.set_json(&note_key(note_id), &note)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Note updated successfully",
            "note": note,
        }))?)
        .build())
}

/// DELETE /api/notes/{id}: owner only.
pub fn delete_note(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let note_id = path_segment(req.path(), 2).unwrap_or("");
    if note_id.is_empty() || !validate_uuid(note_id) {
        return Ok(ApiError::BadRequest("Note ID required".to_string()).into());
    }

    let store = store();
    let note = match store.get_json::<Note>(&note_key(note_id))? {
        Some(n) => n,
        None => return Ok(ApiError::NotFound("Note not found".to_string()).into()),
    };

    if let Err(e) = require_owner(&note.user_id, &user_id) {
        return Ok(e.into());
    }

    store.delete(&note_key(note_id))?;

    let mut index: Vec<String> = store.get_json(&user_notes_key(&user_id))?.unwrap_or_default();
    index.retain(|id| id != note_id);
    store.set_json(&user_notes_key(&user_id), &index)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Note removed successfully"
        }))?)
        .build())
}
