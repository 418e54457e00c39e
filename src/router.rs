use crate::app::App;
use crate::auth::context::clear_cookie_header;
use crate::auth::{now_unix, Role, SessionContext};
use crate::errors::ServerError;
use crate::handlers::{dashboards, login, reports};
use crate::responses::{html_response, html_response_with_cookie, redirect, ResultResp};
use crate::templates::pages::session_expired_page;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, error, warn};

/// Form bodies larger than this are refused.
const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let now = now_unix();
    let mut ctx = SessionContext::from_request(&app.db, &req, app.config.session_ttl_secs, now)?;

    match dispatch(&mut req, app, &mut ctx, now) {
        Err(ServerError::SessionExpired) => {
            warn!(path = req.uri().path(), "backend session expired, signing out");
            if let Err(e) = ctx.logout(now) {
                error!(error = %e, "could not revoke expired session");
            }
            html_response_with_cookie(
                session_expired_page(app.config.expiry_redirect_secs),
                &clear_cookie_header(),
            )
        }
        other => other,
    }
}

fn dispatch(req: &mut Request, app: &App, ctx: &mut SessionContext, now: i64) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => match ctx.current() {
            Some(session) => redirect(session.role.default_route()),
            None => redirect(login::LOGIN_PATH),
        },

        ("GET", ["login"]) => login::show(ctx),
        ("POST", ["login"]) => {
            let form = read_form(req)?;
            login::submit(app, ctx, &form, now)
        }
        ("POST", ["logout"]) => login::logout(app, ctx, now),

        ("GET", ["session-expired"]) => {
            html_response(session_expired_page(app.config.expiry_redirect_secs))
        }

        ("GET", ["reports", key]) => reports::show(app, ctx, key, &parse_query(req)),
        ("POST", ["reports", key, "export"]) => {
            let form = read_form(req)?;
            reports::export(app, ctx, key, &form)
        }

        ("GET", [home]) => match Role::from_route(&format!("/{home}")) {
            Some(role) => dashboards::show(app, ctx, role),
            None => Err(ServerError::NotFound),
        },

        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// `application/x-www-form-urlencoded` body as a map; later keys win.
fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;

    if raw.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("form body too large".to_string()));
    }

    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}
