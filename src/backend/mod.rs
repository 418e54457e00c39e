// src/backend/mod.rs
//! Access to the remote REST backend.
//!
//! Everything above this module talks to the backend through the [`Backend`]
//! trait, so report engines and routes can be exercised against a fake.

mod client;

pub use client::BackendClient;

use serde_json::Value;
use std::error::Error;
use std::fmt;

/// Status code the backend uses to signal an expired session.
pub const SESSION_EXPIRED_STATUS: u16 = 440;

/// Values appended to every mutating request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub session_token: String,
    pub user_id: String,
}

#[derive(Debug)]
pub enum BackendError {
    /// Request never produced a response (connect, timeout, body read).
    Transport(String),
    SessionExpired,
    /// Non-2xx response whose body was not a JSON envelope.
    Status { code: u16, body: String },
    Decode(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(msg) => write!(f, "{msg}"),
            BackendError::SessionExpired => write!(f, "Session expired"),
            BackendError::Status { code, .. } => write!(f, "Backend responded with status {code}"),
            BackendError::Decode(msg) => write!(f, "Unreadable backend response: {msg}"),
        }
    }
}

impl Error for BackendError {}

/// Marker returned by report engines when the backend ended the session.
/// Every other failure is absorbed into the engine's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionExpired;

impl From<SessionExpired> for crate::errors::ServerError {
    fn from(_: SessionExpired) -> Self {
        crate::errors::ServerError::SessionExpired
    }
}

pub trait Backend: Send + Sync {
    /// Idempotent read. Never augmented with credentials.
    fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, BackendError>;

    /// Form-encoded POST; `session_token` and `user_id` are appended.
    fn post_form(
        &self,
        creds: Option<&Credentials>,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<Value, BackendError>;

    /// JSON POST; `session_token` and `user_id` are merged into the object.
    fn post_json(
        &self,
        creds: Option<&Credentials>,
        path: &str,
        body: Value,
    ) -> Result<Value, BackendError>;
}
