// src/auth/context.rs
use astra::Request;
use tracing::{debug, info, warn};

use crate::auth::roles::Role;
use crate::auth::token::{generate_token_default, hash_token};
use crate::backend::Credentials;
use crate::db::connection::Database;
use crate::db::sessions::{
    find_session, insert_session, purge_sessions, revoke_session, StoredSession,
};
use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "outreach_session";

/// The logged-in user as the backend identified them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_token: String,
    pub user_id: String,
    pub role: Role,
}

impl Session {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            session_token: self.session_token.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Session state for one request.
///
/// Storage is read once in [`SessionContext::from_request`]; handlers use
/// [`current`](SessionContext::current) instead of touching the table.
pub struct SessionContext<'a> {
    db: &'a Database,
    cookie: Option<String>,
    current: Option<Session>,
    ttl_secs: i64,
}

impl<'a> SessionContext<'a> {
    pub fn from_request(
        db: &'a Database,
        req: &Request,
        ttl_secs: i64,
        now: i64,
    ) -> Result<Self, ServerError> {
        let cookie = session_cookie(req);

        let current = match &cookie {
            Some(raw) => {
                let hash = hash_token(raw);
                db.with_conn(|conn| find_session(conn, &hash, now))?
                    .and_then(|stored| {
                        Role::parse(&stored.user_type).map(|role| Session {
                            session_token: stored.session_token,
                            user_id: stored.user_id,
                            role,
                        })
                    })
            }
            None => None,
        };

        Ok(Self {
            db,
            cookie,
            current,
            ttl_secs,
        })
    }

    /// Persist a backend session and return the new cookie value.
    pub fn login(
        &mut self,
        session_token: &str,
        user_id: &str,
        user_type: &str,
        now: i64,
    ) -> Result<String, ServerError> {
        let role = Role::parse(user_type)
            .ok_or_else(|| ServerError::Unauthorized(format!("unknown user type {user_type:?}")))?;

        // Never leave a previous login alive behind a new cookie.
        self.logout(now)?;

        let raw = generate_token_default();
        let hash = hash_token(&raw);
        let stored = StoredSession {
            session_token: session_token.to_string(),
            user_id: user_id.to_string(),
            user_type: role.as_str().to_string(),
        };
        self.db
            .with_conn(|conn| insert_session(conn, &hash, &stored, now, self.ttl_secs))?;

        info!(user_id, role = role.as_str(), "session started");

        // Dead rows are swept on every login.
        match self.db.with_conn(|conn| purge_sessions(conn, now)) {
            Ok(0) => {}
            Ok(purged) => debug!(purged, "dead sessions removed"),
            Err(e) => warn!(error = %e, "session cleanup failed"),
        }

        self.cookie = Some(raw.clone());
        self.current = Some(Session {
            session_token: stored.session_token,
            user_id: stored.user_id,
            role,
        });
        Ok(raw)
    }

    pub fn logout(&mut self, now: i64) -> Result<(), ServerError> {
        if let Some(raw) = self.cookie.take() {
            let hash = hash_token(&raw);
            let revoked = self.db.with_conn(|conn| revoke_session(conn, &hash, now))?;
            if revoked > 0 {
                info!("session ended");
            }
        }
        self.current = None;
        Ok(())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}

/// Value of our cookie from any `Cookie` header on the request.
pub fn session_cookie(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn set_cookie_header(raw: &str) -> String {
    format!("{SESSION_COOKIE}={raw}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear_cookie_header() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
