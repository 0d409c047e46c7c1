use spin_sdk::http::{Request, Response};
use uuid::Uuid;
use crate::models::models::{User, Post, PostKind, Comment};
use crate::core::helpers::{store, now_iso, validate_uuid, sanitize_text, path_segment, parse_file_attachment};
use crate::core::errors::ApiError;
use crate::core::guard::{require_owner, require_either_owner};
use crate::core::toggle::{toggle, Toggle};
use crate::core::query_params::{parse_query_params, get_string};
use crate::auth::authenticate;
use crate::config::*;

pub fn create_post(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let store = store();
    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let kind_str = body["type"].as_str().unwrap_or_default();
    let title = body["title"].as_str().unwrap_or_default().trim();
    let content = body["content"].as_str().unwrap_or_default().trim();

    if kind_str.is_empty() || title.is_empty() || content.is_empty() {
        return Ok(ApiError::BadRequest(
            "Please enter title, content and type for the post".to_string(),
        ).into());
    }
    let kind = match PostKind::parse(kind_str) {
        Some(k) => k,
        None => return Ok(ApiError::BadRequest("Invalid post type".to_string()).into()),
    };
    if title.len() > MAX_POST_TITLE_LENGTH || content.len() > MAX_POST_LENGTH {
        return Ok(ApiError::BadRequest("Invalid content".to_string()).into());
    }

    let file = match parse_file_attachment(&body) {
        Ok(f) => f,
        Err(e) => return Ok(e.into()),
    };

    let id = Uuid::new_v4().to_string();
    let post = Post {
        id: id.clone(),
        user_id: user_id.clone(),
        kind,
        title: sanitize_text(title),
        content: sanitize_text(content),
        likes: 0,
        liked_by: Vec::new(),
        comments: Vec::new(),
        file,
        created_at: now_iso(),
    };

    store.set_json(&post_key(&id), &post)?;

    let mut feed: Vec<String> = store.get_json(POSTS_FEED_KEY)?.unwrap_or_default();
    feed.insert(0, id.clone()); // prepend newest
    store.set_json(POSTS_FEED_KEY, &feed)?;

    // Creating a post bumps the owner's counter.
    if let Some(mut owner) = store.get_json::<User>(&user_key(&user_id))? {
        owner.post_count += 1;
        store.set_json(&user_key(&user_id), &owner)?;
    }

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Post created successfully",
            "post": post,
        }))?)
        .build())
}

/// GET /api/posts: public; `?search=` matches title or content,
/// case-insensitively. Feed order is newest first.
pub fn list_posts(req: Request) -> anyhow::Result<Response> {
    let store = store();
    let params = parse_query_params(req.uri());
    let search = get_string(&params, "search").map(|s| s.to_lowercase());

    let feed: Vec<String> = store.get_json(POSTS_FEED_KEY)?.unwrap_or_default();

    let mut posts = Vec::new();
    for id in feed.iter() {
        if let Some(p) = store.get_json::<Post>(&post_key(id))? {
            let keep = match &search {
                Some(q) => {
                    p.title.to_lowercase().contains(q) || p.content.to_lowercase().contains(q)
                }
                None => true,
            };
            if keep {
                posts.push(p);
            }
        }
    }

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"posts": posts}))?)
        .build())
}

/// POST /api/posts/{id}/like: flips the caller in the liked-by set. The
/// counter is recomputed from the set inside the same document write, so the
/// two cannot drift apart.
pub fn toggle_like(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let post_id = path_segment(req.path(), 2).unwrap_or("");
    if post_id.is_empty() || !validate_uuid(post_id) {
        return Ok(ApiError::BadRequest("Post ID required".to_string()).into());
    }

    let store = store();
    let mut post = match store.get_json::<Post>(&post_key(post_id))? {
        Some(p) => p,
        None => return Ok(ApiError::NotFound("Post not found".to_string()).into()),
    };

    let flipped = toggle(&mut post.liked_by, &user_id);
    post.likes = post.liked_by.len() as u32;
    store.set_json(&post_key(post_id), &post)?;

    let message = match flipped {
        Toggle::Added => "Post liked",
        Toggle::Removed => "Post unliked",
    };

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": message,
            "liked": flipped == Toggle::Added,
            "likes": post.likes,
            "liked_by": post.liked_by,
        }))?)
        .build())
}

pub fn delete_post(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let post_id = path_segment(req.path(), 2).unwrap_or("");
    if post_id.is_empty() || !validate_uuid(post_id) {
        return Ok(ApiError::BadRequest("Post ID required".to_string()).into());
    }

    let store = store();
    let post = match store.get_json::<Post>(&post_key(post_id))? {
        Some(p) => p,
        None => return Ok(ApiError::NotFound("Post not found".to_string()).into()),
    };

    if let Err(e) = require_owner(&post.user_id, &user_id) {
        return Ok(e.into());
    }

    store.delete(&post_key(post_id))?;

    let mut feed: Vec<String> = store.get_json(POSTS_FEED_KEY)?.unwrap_or_default();
    feed.retain(|id| id != post_id);
    store.set_json(POSTS_FEED_KEY, &feed)?;

    if let Some(mut owner) = store.get_json::<User>(&user_key(&user_id))? {
        owner.post_count = owner.post_count.saturating_sub(1);
        store.set_json(&user_key(&user_id), &owner)?;
    }

    Ok(Response::builder().status(204).build())
}

/// POST /api/posts/{id}/comments
pub fn add_comment(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let post_id = path_segment(req.path(), 2).unwrap_or("");
    if post_id.is_empty() || !validate_uuid(post_id) {
        return Ok(ApiError::BadRequest("Post ID required".to_string()).into());
    }

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };
    let content = body["content"].as_str().unwrap_or_default().trim();
    if content.is_empty() || content.len() > MAX_COMMENT_LENGTH {
        return Ok(ApiError::BadRequest("Comment content is required".to_string()).into());
    }

    let store = store();
    let mut post = match store.get_json::<Post>(&post_key(post_id))? {
        Some(p) => p,
        None => return Ok(ApiError::NotFound("Post not found".to_string()).into()),
    };

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        user_id,
        content: sanitize_text(content),
        created_at: now_iso(),
    };
    post.comments.push(comment);
    store.set_json(&post_key(post_id), &post)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Comment added successfully",
            "comments": post.comments,
            "comments_count": post.comments.len(),
        }))?)
        .build())
}

/// GET /api/posts/{id}/comments: public.
pub fn list_comments(req: Request) -> anyhow::Result<Response> {
    let post_id = path_segment(req.path(), 2).unwrap_or("");
    if post_id.is_empty() || !validate_uuid(post_id) {
        return Ok(ApiError::BadRequest("Post ID required".to_string()).into());
    }

    let store = store();
    let post = match store.get_json::<Post>(&post_key(post_id))? {
        Some(p) => p,
        None => return Ok(ApiError::NotFound("Post not found".to_string()).into()),
    };

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"comments": post.comments}))?)
        .build())
}

/// DELETE /api/posts/{id}/comments/{comment_id}: comment author or post
/// owner.
pub fn delete_comment(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let path = req.path();
    let post_id = path_segment(path, 2).unwrap_or("");
    let comment_id = path_segment(path, 4).unwrap_or("");
    if post_id.is_empty() || !validate_uuid(post_id) || comment_id.is_empty() {
        return Ok(ApiError::BadRequest("Post and comment IDs required".to_string()).into());
    }

    let store = store();
    let mut post = match store.get_json::<Post>(&post_key(post_id))? {
        Some(p) => p,
        None => return Ok(ApiError::NotFound("Post not found".to_string()).into()),
    };

    let comment = match post.comments.iter().find(|c| c.id == comment_id) {
        Some(c) => c,
        None => return Ok(ApiError::NotFound("Comment not found".to_string()).into()),
    };

    if let Err(e) = require_either_owner(&comment.user_id, &post.user_id, &user_id) {
        return Ok(e.into());
    }

    post.comments.retain(|c| c.id != comment_id);
    store.set_json(&post_key(post_id), &post)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Comment deleted successfully",
            "comments": post.comments,
            "comments_count": post.comments.len(),
        }))?)
        .build())
}
