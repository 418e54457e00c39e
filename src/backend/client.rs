// src/backend/client.rs
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::{Backend, BackendError, Credentials, SESSION_EXPIRED_STATUS};
use crate::config::AppConfig;

const USER_AGENT: &str = concat!("outreach-dashboard/", env!("CARGO_PKG_VERSION"));

pub struct BackendClient {
    client: Client,
    base_url: String,
    retries: u32,
}

impl BackendClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.http_timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.backend_url.trim_end_matches('/').to_string(),
            retries: cfg.http_retries,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn read(path: &str, resp: Response) -> Result<Value, BackendError> {
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        debug!(path, status, bytes = text.len(), "backend response");

        let result = classify_response(status, &text);
        if let Err(BackendError::Status { code, body }) = &result {
            warn!(path, code, body = %body, "backend error without envelope");
        }
        result
    }
}

/// Map a raw status + body to an envelope.
///
/// Error statuses that still carry a JSON object are returned as envelopes
/// so the normalizer can surface the backend's own message.
pub(crate) fn classify_response(status: u16, body: &str) -> Result<Value, BackendError> {
    if status == SESSION_EXPIRED_STATUS {
        return Err(BackendError::SessionExpired);
    }

    let parsed = serde_json::from_str::<Value>(body);

    if (200..300).contains(&status) {
        return parsed.map_err(|e| BackendError::Decode(e.to_string()));
    }

    match parsed {
        Ok(v) if v.is_object() => Ok(v),
        _ => Err(BackendError::Status {
            code: status,
            body: body.chars().take(200).collect(),
        }),
    }
}

/// Form interceptor: existing `session_token`/`user_id` fields are replaced.
pub fn with_session_fields(
    fields: &[(String, String)],
    creds: Option<&Credentials>,
) -> Vec<(String, String)> {
    let Some(creds) = creds else {
        return fields.to_vec();
    };

    let mut out: Vec<(String, String)> = fields
        .iter()
        .filter(|(k, _)| k != "session_token" && k != "user_id")
        .cloned()
        .collect();
    out.push(("session_token".to_string(), creds.session_token.clone()));
    out.push(("user_id".to_string(), creds.user_id.clone()));
    out
}

/// JSON interceptor. Non-object bodies are sent unchanged.
pub fn with_session_json(mut body: Value, creds: Option<&Credentials>) -> Value {
    if let (Some(creds), Some(obj)) = (creds, body.as_object_mut()) {
        obj.insert(
            "session_token".to_string(),
            Value::String(creds.session_token.clone()),
        );
        obj.insert("user_id".to_string(), Value::String(creds.user_id.clone()));
    }
    body
}

impl Backend for BackendClient {
    fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, BackendError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.client.get(&url).query(query).send() {
                Ok(resp) => return Self::read(path, resp),
                Err(e) if attempt < self.retries && (e.is_connect() || e.is_timeout()) => {
                    attempt += 1;
                    warn!(path, attempt, error = %e, "retrying backend GET");
                }
                Err(e) => {
                    warn!(path, error = %e, "backend GET failed");
                    return Err(BackendError::Transport(e.to_string()));
                }
            }
        }
    }

    fn post_form(
        &self,
        creds: Option<&Credentials>,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<Value, BackendError> {
        let fields = with_session_fields(fields, creds);

        let resp = self
            .client
            .post(self.url(path))
            .form(&fields)
            .send()
            .map_err(|e| {
                warn!(path, error = %e, "backend POST failed");
                BackendError::Transport(e.to_string())
            })?;

        Self::read(path, resp)
    }

    fn post_json(
        &self,
        creds: Option<&Credentials>,
        path: &str,
        body: Value,
    ) -> Result<Value, BackendError> {
        let body = with_session_json(body, creds);

        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .map_err(|e| {
                warn!(path, error = %e, "backend POST failed");
                BackendError::Transport(e.to_string())
            })?;

        Self::read(path, resp)
    }
}
