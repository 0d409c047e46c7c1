use spin_sdk::http::{Request, Response};
use spin_sdk::key_value::Store;
use uuid::Uuid;
use crate::models::models::{User, TokenData};
use crate::core::helpers::{
    store, hash_password, verify_password, sanitize_text, is_valid_email, now_iso,
    parse_timestamp,
};
use crate::core::errors::ApiError;
use crate::config::*;

pub fn public_user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "course": user.course,
        "college": user.college,
        "post_count": user.post_count,
        "followers_count": user.followers_count,
    })
}

pub fn find_user_by_email(store: &Store, email: &str) -> anyhow::Result<Option<User>> {
    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();
    for id in users {
        if let Some(u) = store.get_json::<User>(&user_key(&id))? {
            if u.email == email {
                return Ok(Some(u));
            }
        }
    }
    Ok(None)
}

fn issue_token(store: &Store, user_id: &str) -> anyhow::Result<String> {
    let token = Uuid::new_v4().to_string();
    let data = TokenData {
        user_id: user_id.to_string(),
        created_at: now_iso(),
    };
    store.set_json(&token_key(&token), &data)?;

    let mut tokens: Vec<String> = store.get_json(TOKENS_LIST_KEY)?.unwrap_or_default();
    tokens.push(token.clone());
    store.set_json(TOKENS_LIST_KEY, &tokens)?;

    Ok(token)
}

/// Resolve the `Authorization: Bearer <token>` header into a caller id.
///
/// Missing or malformed headers and unknown, expired or dangling tokens all
/// surface as `Unauthorized`; downstream handlers treat the returned id as an
/// opaque string.
pub fn authenticate(req: &Request) -> Result<String, ApiError> {
    let auth_header = req
        .header("Authorization")
        .and_then(|h| h.as_str())
        .unwrap_or_default();
    if !auth_header.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "No token, authorization denied".to_string(),
        ));
    }
    let token = auth_header.strip_prefix("Bearer ").unwrap();

    let store = store();
    let data = store
        .get_json::<TokenData>(&token_key(token))
        .map_err(|e| ApiError::InternalError(e.to_string()))?
        .ok_or_else(|| ApiError::Unauthorized("Token is not valid".to_string()))?;

    if let Some(created) = parse_timestamp(&data.created_at) {
        let age_hours = (chrono::Utc::now() - created).num_hours();
        if age_hours > token_expiration_hours() {
            return Err(ApiError::Unauthorized(
                "Token expired, please log in again".to_string(),
            ));
        }
    }

    // A token whose user has gone away is treated the same as a bad token.
    let exists = store
        .get_json::<User>(&user_key(&data.user_id))
        .map_err(|e| ApiError::InternalError(e.to_string()))?
        .is_some();
    if !exists {
        return Err(ApiError::Unauthorized("Token is not valid".to_string()));
    }

    Ok(data.user_id)
}

/// Fetch the caller's full user document, for handlers that need college or
/// counters rather than just the id.
pub fn authenticated_user(req: &Request) -> Result<User, ApiError> {
    let user_id = authenticate(req)?;
    let store = store();
    store
        .get_json::<User>(&user_key(&user_id))
        .map_err(|e| ApiError::InternalError(e.to_string()))?
        .ok_or_else(|| ApiError::Unauthorized("Token is not valid".to_string()))
}

pub fn signup(req: Request) -> anyhow::Result<Response> {
    let store = store();
    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let name = body["name"].as_str().unwrap_or("").trim();
    let email = body["email"].as_str().unwrap_or("").trim().to_lowercase();
    let password = body["password"].as_str().unwrap_or("");
    let course = body["course"].as_str().unwrap_or("").trim();
    let college = body["college"].as_str().unwrap_or("").trim().to_lowercase();

    if name.is_empty() || email.is_empty() || password.is_empty() || course.is_empty() || college.is_empty() {
        return Ok(ApiError::BadRequest("Please enter all fields".to_string()).into());
    }
    if name.len() > MAX_NAME_LENGTH || course.len() > MAX_COURSE_LENGTH || college.len() > MAX_COLLEGE_LENGTH {
        return Ok(ApiError::BadRequest("Field too long".to_string()).into());
    }
    if !is_valid_email(&email) {
        return Ok(ApiError::BadRequest("Please enter a valid email address".to_string()).into());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Ok(ApiError::BadRequest(
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ).into());
    }

    if find_user_by_email(&store, &email)?.is_some() {
        return Ok(ApiError::Conflict("User already exists".to_string()).into());
    }

    let id = Uuid::new_v4().to_string();
    let user = User {
        id: id.clone(),
        name: sanitize_text(name),
        email,
        password: hash_password(password)?,
        course: sanitize_text(course),
        college: sanitize_text(&college),
        post_count: 0,
        followers_count: 0,
        following: Vec::new(),
        created_at: now_iso(),
    };

    store.set_json(&user_key(&id), &user)?;

    let mut users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();
    users.push(id.clone());
    store.set_json(USERS_LIST_KEY, &users)?;

    let token = issue_token(&store, &id)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "User registered successfully",
            "token": token,
            "user": public_user_json(&user),
        }))?)
        .build())
}

pub fn login(req: Request) -> anyhow::Result<Response> {
    let store = store();
    let creds: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    let email = creds["email"].as_str().unwrap_or_default().trim().to_lowercase();
    let password = creds["password"].as_str().unwrap_or_default();
    let college = creds["college"].as_str().unwrap_or_default().trim().to_lowercase();

    if email.is_empty() || password.is_empty() || college.is_empty() {
        return Ok(ApiError::BadRequest("Please enter all fields".to_string()).into());
    }

    // One failure message for every branch, so a caller cannot probe which
    // field was wrong.
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = match find_user_by_email(&store, &email)? {
        Some(u) => u,
        None => return Ok(invalid().into()),
    };
    if !verify_password(password, &user.password) {
        return Ok(invalid().into());
    }
    if user.college != college {
        return Ok(invalid().into());
    }

    let token = issue_token(&store, &user.id)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Logged in successfully",
            "token": token,
            "user": public_user_json(&user),
        }))?)
        .build())
}

pub fn logout(req: Request) -> anyhow::Result<Response> {
    let store = store();
    let auth_header = req
        .header("Authorization")
        .and_then(|h| h.as_str())
        .unwrap_or_default();

    if !auth_header.starts_with("Bearer ") {
        return Ok(ApiError::Unauthorized("No token, authorization denied".to_string()).into());
    }

    let token = auth_header.strip_prefix("Bearer ").unwrap();
    store.delete(&token_key(token))?;

    let mut tokens: Vec<String> = store.get_json(TOKENS_LIST_KEY)?.unwrap_or_default();
    tokens.retain(|t| t != token);
    store.set_json(TOKENS_LIST_KEY, &tokens)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Logged out successfully"
        }))?)
        .build())
}

pub fn me(req: Request) -> anyhow::Result<Response> {
    let user = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "user": public_user_json(&user)
        }))?)
        .build())
}

pub fn update_profile(req: Request) -> anyhow::Result<Response> {
    let mut user = match authenticated_user(&req) {
        Ok(u) => u,
        Err(e) => return Ok(e.into()),
    };

    let store = store();
    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };

    if let Some(name) = body["name"].as_str() {
        let name = name.trim();
        if name.is_empty() || name.len() > MAX_NAME_LENGTH {
            return Ok(ApiError::BadRequest("Invalid name".to_string()).into());
        }
        user.name = sanitize_text(name);
    }
    if let Some(course) = body["course"].as_str() {
        let course = course.trim();
        if course.is_empty() || course.len() > MAX_COURSE_LENGTH {
            return Ok(ApiError::BadRequest("Invalid course".to_string()).into());
        }
        user.course = sanitize_text(course);
    }
    if let Some(college) = body["college"].as_str() {
        let college = college.trim().to_lowercase();
        if college.is_empty() || college.len() > MAX_COLLEGE_LENGTH {
            return Ok(ApiError::BadRequest("Invalid college".to_string()).into());
        }
        user.college = sanitize_text(&college);
    }

    store.set_json(&user_key(&user.id), &user)?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Profile updated successfully",
            "user": public_user_json(&user),
        }))?)
        .build())
}
