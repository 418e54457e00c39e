// src/handlers/login.rs
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::app::App;
use crate::auth::context::{clear_cookie_header, set_cookie_header};
use crate::auth::SessionContext;
use crate::errors::ServerError;
use crate::report::normalize::{is_success, message};
use crate::report::{failure_text, Notice};
use crate::responses::{html_response, redirect, redirect_with_cookie, ResultResp};
use crate::templates::pages::login_page;

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";

const LOGIN_FAILED: &str = "Login failed";

/// What the backend hands back on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub session_token: String,
    pub user_id: String,
    pub user_type: String,
}

/// Reads the grant from `data` when present, else from the top level.
/// `user_id` may arrive as a string or a number.
pub fn login_grant(response: &Value) -> Option<LoginGrant> {
    if !is_success(response) {
        return None;
    }
    let src = match response.get("data") {
        Some(data) if data.is_object() => data,
        _ => response,
    };

    let text = |key: &str| -> Option<String> {
        match src.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    Some(LoginGrant {
        session_token: text("session_token")?,
        user_id: text("user_id")?,
        user_type: text("user_type")?,
    })
}

pub fn show(ctx: &SessionContext) -> ResultResp {
    match ctx.current() {
        Some(session) => redirect(session.role.default_route()),
        None => html_response(login_page("", None)),
    }
}

pub fn submit(
    app: &App,
    ctx: &mut SessionContext,
    form: &HashMap<String, String>,
    now: i64,
) -> ResultResp {
    let username = form.get("username").map(|s| s.trim()).unwrap_or("");
    let password = form.get("password").map(String::as_str).unwrap_or("");

    if username.is_empty() || password.is_empty() {
        let hint = Notice::warning("Please enter your username and password.");
        return html_response(login_page(username, Some(&hint)));
    }

    let body = json!({ "username": username, "password": password });
    let response = match app.backend.post_json(None, LOGIN_PATH, body) {
        Ok(v) => v,
        Err(e) => {
            warn!(username, error = %e, "login request failed");
            let failed = Notice::error(failure_text(&e, LOGIN_FAILED));
            return html_response(login_page(username, Some(&failed)));
        }
    };

    let Some(grant) = login_grant(&response) else {
        let text = message(&response).unwrap_or_else(|| LOGIN_FAILED.to_string());
        info!(username, "login refused");
        return html_response(login_page(username, Some(&Notice::error(text))));
    };

    match ctx.login(&grant.session_token, &grant.user_id, &grant.user_type, now) {
        Ok(cookie) => {
            let home = ctx
                .current()
                .map(|s| s.role.default_route())
                .ok_or(ServerError::InternalError)?;
            redirect_with_cookie(home, &set_cookie_header(&cookie))
        }
        Err(ServerError::Unauthorized(reason)) => {
            warn!(username, %reason, "login for unsupported account type");
            let refused = Notice::error("This account type cannot use the dashboard.");
            html_response(login_page(username, Some(&refused)))
        }
        Err(e) => Err(e),
    }
}

/// Tells the backend first, but a failure there never keeps the user
/// logged in locally.
pub fn logout(app: &App, ctx: &mut SessionContext, now: i64) -> ResultResp {
    if let Some(session) = ctx.current() {
        let creds = session.credentials();
        if let Err(e) = app.backend.post_json(Some(&creds), LOGOUT_PATH, json!({})) {
            warn!(error = %e, "backend logout failed");
        }
    }
    ctx.logout(now)?;
    redirect_with_cookie(LOGIN_PATH, &clear_cookie_header())
}
