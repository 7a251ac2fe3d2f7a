use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::SessionRow;

pub fn insert_session(
    conn: &mut DbConn,
    token: &str,
    user_id: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Result<SessionRow> {
    let sql = "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4) RETURNING token, user_id, expires_at";

    conn.query_row(
        sql,
        params![token, user_id, created_at, expires_at],
        parse_session_row,
    )
    .context("Failed to insert session")
}

fn parse_session_row(row: &rusqlite::Row) -> rusqlite::Result<SessionRow> {
    Ok(SessionRow {
        token: row.get(0)?,
        user_id: row.get(1)?,
        expires_at: row.get(2)?,
    })
}

/// Session for `token` that has not expired at `now`
pub fn find_valid(conn: &mut DbConn, token: &str, now: DateTime<Utc>) -> Result<Option<SessionRow>> {
    let sql = "SELECT token, user_id, expires_at FROM sessions WHERE token = ?1";

    let session = conn
        .query_row(sql, params![token], parse_session_row)
        .optional()
        .context("Failed to query session")?;

    Ok(session.filter(|s| s.expires_at > now))
}

pub fn delete_session(conn: &mut DbConn, token: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM sessions WHERE token = ?1", params![token])
        .context("Failed to delete session")?;
    Ok(deleted > 0)
}

pub fn delete_expired(conn: &mut DbConn, now: DateTime<Utc>) -> Result<usize> {
    conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", params![now])
        .context("Failed to delete expired sessions")
}
