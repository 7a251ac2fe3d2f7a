use anyhow::{Context, Result};

use super::connection::DbConn;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates missing tables and indexes, keeping existing data
pub fn init_database(conn: &mut DbConn) -> Result<()> {
    let statements: Vec<String> = split_sql_statements(SCHEMA_SQL)
        .into_iter()
        .filter(|s| !is_drop_statement(s))
        .collect();
    run_statements(conn, &statements)?;

    log::info!("Database schema ready");
    Ok(())
}

/// Drops every table and recreates the schema from scratch
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    run_statements(conn, &split_sql_statements(SCHEMA_SQL))?;

    log::info!("Database schema reset successfully");
    Ok(())
}

fn run_statements(conn: &mut DbConn, statements: &[String]) -> Result<()> {
    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_drop_statement(statement: &str) -> bool {
    statement.to_ascii_uppercase().starts_with("DROP ")
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
