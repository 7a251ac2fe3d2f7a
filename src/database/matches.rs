use anyhow::{Context, Result};
use rusqlite::params;
use rusqlite::types::Type;

use super::connection::DbConn;
use crate::domain::{Match, NewMatch};
use crate::scoring::{MatchOutcome, SetScore};

const MATCH_COLUMNS: &str =
    "id, user_id, user_name, opponent_name, sets_json, result, is_finished, created_at";

pub fn insert_match(conn: &mut DbConn, new_match: &NewMatch) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (user_id, user_name, opponent_name, sets_json, result, is_finished, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {}",
        MATCH_COLUMNS
    );
    let sets_json = encode_sets(&new_match.sets)?;

    conn.query_row(
        &sql,
        params![
            new_match.user_id,
            new_match.user_name,
            new_match.opponent_name,
            sets_json,
            new_match.outcome.as_str(),
            new_match.is_finished,
            new_match.created_at
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    let sets_json: String = row.get(4)?;
    let sets: Vec<SetScore> = serde_json::from_str(&sets_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    let result: String = row.get(5)?;
    let outcome: MatchOutcome = result
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Match {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        opponent_name: row.get(3)?,
        sets,
        outcome,
        is_finished: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn encode_sets(sets: &[SetScore]) -> Result<String> {
    serde_json::to_string(sets).context("Failed to serialize match sets")
}

/// All matches owned by `user_id`, in no particular order
pub fn list_by_user(conn: &mut DbConn, user_id: i64) -> Result<Vec<Match>> {
    let sql = format!("SELECT {} FROM matches WHERE user_id = ?1", MATCH_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![user_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Overwrites the scoreline of an owned match.
/// Returns `None` when no match with that id belongs to the user.
pub fn update_match(
    conn: &mut DbConn,
    user_id: i64,
    id: i64,
    opponent_name: &str,
    sets: &[SetScore],
    outcome: MatchOutcome,
    is_finished: bool,
) -> Result<Option<Match>> {
    use rusqlite::OptionalExtension;

    let sql = format!(
        "UPDATE matches SET opponent_name = ?1, sets_json = ?2, result = ?3, is_finished = ?4 WHERE id = ?5 AND user_id = ?6 RETURNING {}",
        MATCH_COLUMNS
    );
    let sets_json = encode_sets(sets)?;

    conn.query_row(
        &sql,
        params![opponent_name, sets_json, outcome.as_str(), is_finished, id, user_id],
        parse_match_row,
    )
    .optional()
    .context("Failed to update match")
}

pub fn delete_match(conn: &mut DbConn, user_id: i64, id: i64) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM matches WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )
        .context("Failed to delete match")?;
    Ok(deleted > 0)
}
