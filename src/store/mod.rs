//! Table-oriented data store used by the dashboard.
//!
//! The backend is addressed the way the hosted table API is: whole rows go in
//! and come out as JSON objects, so columns the dashboard does not know about
//! (or knows under another name) survive the round trip and reach the
//! normalizers untouched.

pub mod postgres;

use serde_json::{Map, Value};
use std::fmt;

pub use postgres::PgTableStore;

/// One backend row, keyed by column name.
pub type Row = Map<String, Value>;

/// Tables the dashboard reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Events,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Events => "events",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering for `select`.
#[derive(Debug, Clone, Copy)]
pub struct OrderBy {
    pub column: &'static str,
    pub ascending: bool,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self { column, ascending: true }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Db(sqlx::Error),
    Decode(serde_json::Error),
    InvalidColumn(String),
    NotFound { table: Table, id: String },
    /// The backend answered but refused the operation.
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Db(e) => write!(f, "database error: {e}"),
            StoreError::Decode(e) => write!(f, "row decode error: {e}"),
            StoreError::InvalidColumn(c) => write!(f, "invalid column name '{c}'"),
            StoreError::NotFound { table, id } => write!(f, "no row with id '{id}' in {table}"),
            StoreError::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Db(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e)
    }
}

/// CRUD against the remote table store.
///
/// An `Err` is the only failure signal. Handlers run on actix's
/// per-worker single-threaded runtime, so the futures are not required to be
/// `Send`.
#[allow(async_fn_in_trait)]
pub trait TableStore {
    async fn select(&self, table: Table, order: Option<OrderBy>) -> Result<Vec<Row>, StoreError>;

    /// Insert one row and return it as stored (server defaults filled in).
    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError>;

    /// Apply a partial update to the row whose `id` matches, returning the
    /// updated row.
    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<Row, StoreError>;

    async fn delete(&self, table: Table, id: &str) -> Result<(), StoreError>;
}

/// Column names are spliced into SQL, so only plain identifiers pass.
pub fn is_valid_column(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Read a row's `id` as a string, whatever JSON type the backend used.
pub fn row_id(row: &Row) -> Option<String> {
    match row.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
