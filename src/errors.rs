use astra::Response;
// errors.rs
use std::fmt;

use crate::backend::BackendError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, backend).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Unauthorized(String),
    DbError(String),
    Backend(String),
    /// The backend answered 440; handled globally by the router.
    SessionExpired,
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::Backend(msg) => write!(f, "Backend Error: {msg}"),
            ServerError::SessionExpired => write!(f, "Session expired"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<BackendError> for ServerError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::SessionExpired => ServerError::SessionExpired,
            other => ServerError::Backend(other.to_string()),
        }
    }
}
