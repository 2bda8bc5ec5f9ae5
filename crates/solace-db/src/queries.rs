use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::{PublicUserRow, UserRow};
use crate::{Database, DbError, Result};

impl Database {
    // -- Users --

    /// Inserts a user and returns the stored row in the same statement.
    /// A taken username surfaces as [`DbError::DuplicateUsername`]; the
    /// UNIQUE constraint is the only uniqueness check.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<PublicUserRow> {
        self.with_conn_mut(|conn| {
            conn.query_row(
                "INSERT INTO users (username, password) VALUES (?1, ?2)
                 RETURNING id, username, created_at",
                (username, password_hash),
                public_user_from_row,
            )
            .map_err(map_insert_error)
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<PublicUserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<PublicUserRow>> {
    let mut stmt = conn.prepare("SELECT id, username, created_at FROM users WHERE id = ?1")?;
    let row = stmt.query_row([id], public_user_from_row).optional()?;
    Ok(row)
}

fn public_user_from_row(row: &Row<'_>) -> rusqlite::Result<PublicUserRow> {
    Ok(PublicUserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        created_at: row.get(2)?,
    })
}

fn map_insert_error(err: rusqlite::Error) -> DbError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            DbError::DuplicateUsername
        }
        other => other.into(),
    }
}
