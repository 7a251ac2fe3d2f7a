use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::User;

pub fn insert_user(
    conn: &mut DbConn,
    name: &str,
    email: &str,
    password_hash: &str,
    created_at: DateTime<Utc>,
) -> Result<User> {
    let sql = "INSERT INTO users (name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4) RETURNING id, name, email, password_hash";

    conn.query_row(sql, params![name, email, password_hash, created_at], parse_user_row)
        .context("Failed to insert user")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
    })
}

pub fn find_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let sql = "SELECT id, name, email, password_hash FROM users WHERE email = ?1";

    conn.query_row(sql, params![email], parse_user_row)
        .optional()
        .context("Failed to query user by email")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<User>> {
    let sql = "SELECT id, name, email, password_hash FROM users WHERE id = ?1";

    conn.query_row(sql, params![id], parse_user_row)
        .optional()
        .context("Failed to query user by id")
}
