use spin_sdk::http::Response;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden,
    NotFound(String),
    Conflict(String),
    InvalidOperation(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden => write!(f, "Forbidden"),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InvalidOperation(msg) => write!(f, "Invalid Operation: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

fn json_error(status: u16, msg: &str) -> Response {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({"error": msg})).unwrap())
        .build()
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::BadRequest(msg) => json_error(400, &msg),
            ApiError::Unauthorized(msg) => json_error(401, &msg),
            ApiError::Forbidden => json_error(403, "Forbidden"),
            ApiError::NotFound(msg) => json_error(404, &msg),
            ApiError::Conflict(msg) => json_error(409, &msg),
            ApiError::InvalidOperation(msg) => json_error(400, &msg),
            ApiError::InternalError(msg) => {
                // Details go to the log, never to the caller.
                log::error!("internal error: {}", msg);
                json_error(500, "Internal server error")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
