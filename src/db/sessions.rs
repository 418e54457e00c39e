// src/db/sessions.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

/// What the backend handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub session_token: String,
    pub user_id: String,
    pub user_type: String,
}

pub fn insert_session(
    conn: &Connection,
    cookie_hash: &[u8],
    session: &StoredSession,
    now: i64,
    ttl_secs: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into sessions (cookie_hash, session_token, user_id, user_type, created_at, expires_at)
        values (?, ?, ?, ?, ?, ?)
        "#,
        params![
            cookie_hash,
            session.session_token,
            session.user_id,
            session.user_type,
            now,
            now + ttl_secs
        ],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(())
}

pub fn find_session(
    conn: &Connection,
    cookie_hash: &[u8],
    now: i64,
) -> Result<Option<StoredSession>, ServerError> {
    conn.query_row(
        r#"
        select session_token, user_id, user_type
        from sessions
        where cookie_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![cookie_hash, now],
        |row| {
            Ok(StoredSession {
                session_token: row.get(0)?,
                user_id: row.get(1)?,
                user_type: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, cookie_hash: &[u8], now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where cookie_hash = ? and revoked_at is null",
        params![now, cookie_hash],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))
}

/// Drop rows that can no longer authenticate anyone.
pub fn purge_sessions(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}
