// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for request records.
//!
//! The [`Database`] struct provides all data access operations. There is a
//! single table; every write touches exactly one row.

use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use std::path::Path;

use crate::error::{Error, Result, ValidationError};
use crate::filter::RequestFilter;
use crate::request::{format_timestamp, NewRequest, Request, RequestUpdate};

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "requests.db";

/// SQL schema for the request store.
///
/// Length hints mirror the form limits; SQLite does not enforce them.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,                       -- 120
    contact TEXT,                             -- 180
    title TEXT NOT NULL,                      -- 200
    details TEXT NOT NULL,
    category TEXT,                            -- 80
    priority TEXT NOT NULL DEFAULT 'normal',  -- low|normal|high
    status TEXT NOT NULL DEFAULT 'new',       -- new|in_progress|done
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_requests_created ON requests(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_requests_status ON requests(status);
CREATE INDEX IF NOT EXISTS idx_requests_category ON requests(category);
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, name, contact, title, details, category, priority, status, created_at FROM requests";

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

fn request_from_row(row: &Row<'_>) -> std::result::Result<Request, rusqlite::Error> {
    let created_str: String = row.get(8)?;
    Ok(Request {
        id: row.get(0)?,
        name: row.get(1)?,
        contact: row.get(2)?,
        title: row.get(3)?,
        details: row.get(4)?,
        category: row.get(5)?,
        priority: row.get(6)?,
        status: row.get(7)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

/// Run schema creation on a database connection. Idempotent.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Register `fold_case(text)`, a Unicode lowercase used by the text search.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )?;
    Ok(())
}

/// SQLite database connection with request store operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        Self::init(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        register_functions(&conn)?;
        run_migrations(&conn)?;
        Ok(Database { conn })
    }

    /// Store a new request and return it with its assigned id and timestamp.
    ///
    /// Fails with [`Error::Validation`] if `name`, `title` or `details` is blank.
    pub fn insert_request(&self, new: &NewRequest) -> Result<Request> {
        let missing = new.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        let created_at = new.created_at.unwrap_or_else(Utc::now);
        self.conn.execute(
            "INSERT INTO requests (name, contact, title, details, category, priority, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                new.name,
                new.contact,
                new.title,
                new.details,
                new.category,
                new.priority,
                new.status,
                format_timestamp(&created_at),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_request(id)
    }

    /// Get a request by id.
    pub fn get_request(&self, id: i64) -> Result<Request> {
        let request = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                request_from_row,
            )
            .optional()?;

        request.ok_or(Error::RequestNotFound(id))
    }

    /// Apply the present fields of `update` in a single statement.
    ///
    /// An empty update writes nothing but still fails for an unknown id.
    pub fn update_request(&self, id: i64, update: &RequestUpdate) -> Result<Request> {
        if update.is_empty() {
            return self.get_request(id);
        }

        let mut assignments = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(status) = &update.status {
            assignments.push("status = ?");
            values.push(status);
        }
        if let Some(priority) = &update.priority {
            assignments.push("priority = ?");
            values.push(priority);
        }

        let sql = format!(
            "UPDATE requests SET {} WHERE id = ?",
            assignments.join(", ")
        );
        values.push(&id);

        let affected = self.conn.execute(&sql, values.as_slice())?;
        if affected == 0 {
            return Err(Error::RequestNotFound(id));
        }
        self.get_request(id)
    }

    /// List requests matching `filter`, newest first.
    ///
    /// Requests with equal timestamps come back in reverse insertion order.
    pub fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<Request>> {
        let (where_clause, values) = filter.where_clause();
        let sql = format!("{SELECT_COLUMNS}{where_clause} ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let requests = stmt
            .query_map(params_from_iter(values.iter()), request_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(requests)
    }

    /// Get all requests, newest first.
    pub fn get_all_requests(&self) -> Result<Vec<Request>> {
        self.list_requests(&RequestFilter::default())
    }

    /// Distinct non-empty categories across all requests, ascending.
    pub fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT category FROM requests
             WHERE category IS NOT NULL AND category != ''
             ORDER BY category ASC",
        )?;

        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(categories)
    }

    /// Total number of stored requests.
    pub fn count_requests(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM requests", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
