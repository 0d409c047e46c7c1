use spin_sdk::http::{Request, Response};
use uuid::Uuid;
use crate::models::models::{Group, Message};
use crate::core::helpers::{store, now_iso, validate_uuid, sanitize_text, path_segment, parse_file_attachment};
use crate::core::errors::ApiError;
use crate::core::guard::{require_owner, require_either_owner, require_member};
use crate::core::query_params::{parse_query_params, get_bool_flag};
use crate::auth::authenticated_user;
use crate::config::*;

fn load_group(store: &spin_sdk::key_value::Store, id: &str) -> anyhow::Result<Option<Group>> {
    store.get_json::<Group>(&group_key(id)).map_err(Into::into)
}

pub fn create_group(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let name = body["name"].as_str().unwrap_or_default().trim();
    let description = body["description"].as_str().unwrap_or_default().trim();

    if name.is_empty() {
        return Ok(ApiError::BadRequest("Group name is required".to_string()).into());
    }
    if name.len() > MAX_GROUP_NAME_LENGTH || description.len() > MAX_DESCRIPTION_LENGTH {
        return Ok(ApiError::BadRequest("Field too long".to_string()).into());
    }

    let name = sanitize_text(name);

    let store = store();

    // Group names are unique across colleges.
    let groups: Vec<String> = store.get_json(GROUPS_LIST_KEY)?.unwrap_or_default();
    for id in &groups {
        if let Some(g) = load_group(&store, id)? {
            if g.name == name {
                return Ok(ApiError::Conflict(
                    "A group with this name already exists".to_string(),
                ).into());
            }
        }
    }

    let tags = body["tags"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t.as_str())
                .map(|t| sanitize_text(t.trim()).to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let id = Uuid::new_v4().to_string();
    let group = Group {
        id: id.clone(),
        name,
        description: sanitize_text(description),
        tags,
        creator_id: caller.id.clone(),
        college: caller.college,
        // The creator is a member from the first write onward.
        members: vec![caller.id],
        messages: Vec::new(),
        created_at: now_iso(),
    };

    store.set_json(&group_key(&id), &group)?;

    let mut groups = groups;
    groups.insert(0, id);
    store.set_json(GROUPS_LIST_KEY, &groups)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Study group created successfully",
            "group": group,
        }))?)
        .build())
}

/// GET /api/groups: every group in the caller's college, newest first;
/// `?myGroups=true` keeps only groups the caller is a member of.
pub fn list_groups(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let params = parse_query_params(req.uri());
    let my_groups = get_bool_flag(&params, "myGroups");

    let store = store();
    let index: Vec<String> = store.get_json(GROUPS_LIST_KEY)?.unwrap_or_default();

    let mut groups = Vec::new();
    for id in index.iter() {
        if let Some(g) = load_group(&store, id)? {
            if g.college != caller.college {
                continue;
            }
            if my_groups && !g.members.contains(&caller.id) {
                continue;
            }
            groups.push(g);
        }
    }

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"groups": groups}))?)
        .build())
}

/// POST /api/groups/{id}/join
pub fn join_group(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let group_id = path_segment(req.path(), 2).unwrap_or("");
    if group_id.is_empty() || !validate_uuid(group_id) {
        return Ok(ApiError::BadRequest("Group ID required".to_string()).into());
    }

    let store = store();
    let mut group = match load_group(&store, group_id)? {
        Some(g) => g,
        None => return Ok(ApiError::NotFound("Study group not found".to_string()).into()),
    };

    if group.members.contains(&caller.id) {
        return Ok(ApiError::Conflict("Already a member of this group".to_string()).into());
    }

    group.members.push(caller.id);
    store.set_json(&group_key(group_id), &group)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Successfully joined the group",
            "group": group,
        }))?)
        .build())
}

/// POST /api/groups/{id}/leave: the creator cannot leave while they are the
/// sole member.
pub fn leave_group(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let group_id = path_segment(req.path(), 2).unwrap_or("");
    if group_id.is_empty() || !validate_uuid(group_id) {
        return Ok(ApiError::BadRequest("Group ID required".to_string()).into());
    }

    let store = store();
    let mut group = match load_group(&store, group_id)? {
        Some(g) => g,
        None => return Ok(ApiError::NotFound("Study group not found".to_string()).into()),
    };

    if !group.members.contains(&caller.id) {
        return Ok(ApiError::BadRequest("Not a member of this group".to_string()).into());
    }

    if group.creator_id == caller.id && group.members.len() == 1 {
        return Ok(ApiError::InvalidOperation(
            "Creator cannot leave as the only member; delete the group instead".to_string(),
        ).into());
    }

    group.members.retain(|m| m != &caller.id);
    store.set_json(&group_key(group_id), &group)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Successfully left the group",
            "group": group,
        }))?)
        .build())
}

/// DELETE /api/groups/{id}: creator only.
pub fn delete_group(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let group_id = path_segment(req.path(), 2).unwrap_or("");
    if group_id.is_empty() || !validate_uuid(group_id) {
        return Ok(ApiError::BadRequest("Group ID required".to_string()).into());
    }

    let store = store();
    let group = match load_group(&store, group_id)? {
        Some(g) => g,
        None => return Ok(ApiError::NotFound("Study group not found".to_string()).into()),
    };

    if let Err(e) = require_owner(&group.creator_id, &caller.id) {
        return Ok(e.into());
    }

    store.delete(&group_key(group_id))?;

    let mut index: Vec<String> = store.get_json(GROUPS_LIST_KEY)?.unwrap_or_default();
    index.retain(|id| id != group_id);
    store.set_json(GROUPS_LIST_KEY, &index)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Study group deleted successfully"
        }))?)
        .build())
}

/// POST /api/groups/{id}/messages: members only; text, attachment or both.
pub fn post_message(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let group_id = path_segment(req.path(), 2).unwrap_or("");
    if group_id.is_empty() || !validate_uuid(group_id) {
        return Ok(ApiError::BadRequest("Group ID required".to_string()).into());
    }

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let content = body["content"].as_str().unwrap_or_default().trim();
    if content.len() > MAX_MESSAGE_LENGTH {
        return Ok(ApiError::BadRequest("Message too long".to_string()).into());
    }
    let file = match parse_file_attachment(&body) {
        Ok(f) => f,
        Err(e) => return Ok(e.into()),
    };
    if content.is_empty() && file.is_none() {
        return Ok(ApiError::BadRequest(
            "Message content or attachment is required".to_string(),
        ).into());
    }

    let store = store();
    let mut group = match load_group(&store, group_id)? {
        Some(g) => g,
        None => return Ok(ApiError::NotFound("Study group not found".to_string()).into()),
    };

    if let Err(e) = require_member(&group.members, &caller.id) {
        return Ok(e.into());
    }

    let message = Message {
        id: Uuid::new_v4().to_string(),
        sender_id: caller.id,
        content: sanitize_text(content),
        file,
        created_at: now_iso(),
    };
    group.messages.push(message);
    store.set_json(&group_key(group_id), &group)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Message sent",
            "messages": group.messages,
        }))?)
        .build())
}

/// GET /api/groups/{id}/messages: members only.
pub fn list_messages(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let group_id = path_segment(req.path(), 2).unwrap_or("");
    if group_id.is_empty() || !validate_uuid(group_id) {
        return Ok(ApiError::BadRequest("Group ID required".to_string()).into());
    }

    let store = store();
    let group = match load_group(&store, group_id)? {
        Some(g) => g,
        None => return Ok(ApiError::NotFound("Study group not found".to_string()).into()),
    };

    if let Err(e) = require_member(&group.members, &caller.id) {
        return Ok(e.into());
    }

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"messages": group.messages}))?)
        .build())
}

/// DELETE /api/groups/{id}/messages/{message_id}: sender or group creator.
pub fn delete_message(req: Request) -> anyhow::Result<Response> {
    let caller = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let path = req.path();
    let group_id = path_segment(path, 2).unwrap_or("");
    let message_id = path_segment(path, 4).unwrap_or("");
    if group_id.is_empty() || !validate_uuid(group_id) || message_id.is_empty() {
        return Ok(ApiError::BadRequest("Group and message IDs required".to_string()).into());
    }

    let store = store();
    let mut group = match load_group(&store, group_id)? {
        Some(g) => g,
        None => return Ok(ApiError::NotFound("Study group not found".to_string()).into()),
    };

    let message = match group.messages.iter().find(|m| m.id == message_id) {
        Some(m) => m,
        None => return Ok(ApiError::NotFound("Message not found".to_string()).into()),
    };

    if let Err(e) = require_either_owner(&message.sender_id, &group.creator_id, &caller.id) {
        return Ok(e.into());
    }

    group.messages.retain(|m| m.id != message_id);
    store.set_json(&group_key(group_id), &group)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Message deleted successfully",
            "messages": group.messages,
        }))?)
        .build())
}
