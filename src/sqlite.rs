//! The per-call database facade.
//!
//! [`Database`] holds nothing but its [`SqliteConfig`]. Every statement opens
//! a fresh `rusqlite::Connection` on tokio's blocking pool, runs, and closes
//! the connection before the call returns, on success and failure alike.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SqliteError, SqliteResult};
use crate::executor::SqlExecutor;
use crate::row::Row;
use crate::value::{Params, Value};

/// SQLite facade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// How long a handle waits on a locked file before failing with `SQLITE_BUSY`.
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
    /// Open handles read-only; the file must already exist.
    #[serde(default)]
    pub read_only: bool,
    /// Turn on foreign key enforcement for each handle.
    #[serde(default)]
    pub foreign_keys: bool,
}

impl SqliteConfig {
    /// Create a config for the given path with SQLite's defaults
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: None,
            read_only: false,
            foreign_keys: false,
        }
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    fn open_flags(&self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.read_only {
            base | OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
        }
    }

    /// Open a handle and apply the per-handle settings.
    fn connect(&self) -> SqliteResult<Connection> {
        trace!(path = %self.db_path.display(), read_only = self.read_only, "opening handle");
        let conn = Connection::open_with_flags(&self.db_path, self.open_flags()).map_err(
            |source| SqliteError::Open {
                path: self.db_path.clone(),
                source,
            },
        )?;
        if let Some(ms) = self.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms))?;
        }
        if self.foreign_keys {
            conn.pragma_update(None, "foreign_keys", true)?;
        }
        Ok(conn)
    }
}

/// SQL statement text together with its bound parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Params,
}

impl SqlQuery {
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_string(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Handle-per-call SQLite facade.
///
/// Cloning is cheap and clones share nothing but the configuration.
#[derive(Debug, Clone)]
pub struct Database {
    config: SqliteConfig,
}

impl Database {
    /// Create a facade with the given config
    pub fn new(config: SqliteConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a facade over `path` with default settings.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(SqliteConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.db_path
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Open a handle, run `f` against it on the blocking pool, close it.
    ///
    /// Blank statement text is rejected before any handle is opened.
    /// A failure from `f` takes precedence over a failure to close.
    async fn with_connection<F, T>(&self, query: SqlQuery, f: F) -> SqliteResult<T>
    where
        F: FnOnce(&Connection, &SqlQuery) -> SqliteResult<T> + Send + 'static,
        T: Send + 'static,
    {
        if query.statement.trim().is_empty() {
            return Err(SqliteError::EmptyStatement);
        }
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            let conn = config.connect()?;
            debug!(sql = %query.statement, params = query.params.len(), "running statement");
            let outcome = f(&conn, &query);
            let closed = conn
                .close()
                .map_err(|(_conn, source)| SqliteError::Close { source });
            let value = outcome?;
            closed?;
            Ok(value)
        })
        .await?
    }
}

/// Step the statement to completion, discarding any rows it yields.
fn run_execute(conn: &Connection, query: &SqlQuery) -> SqliteResult<()> {
    let mut stmt = conn.prepare(&query.statement)?;
    let mut rows = stmt.query(params_from_iter(query.params.iter()))?;
    while rows.next()?.is_some() {}
    Ok(())
}

/// Materialize at most `limit` rows.
fn run_query(conn: &Connection, query: &SqlQuery, limit: Option<usize>) -> SqliteResult<Vec<Row>> {
    let mut stmt = conn.prepare(&query.statement)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query(params_from_iter(query.params.iter()))?;

    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let values = (0..columns.len())
            .map(|idx| row.get_ref(idx).map(Value::from))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        result.push(Row::from_parts(columns.clone(), values));
        if limit.is_some_and(|limit| result.len() >= limit) {
            break;
        }
    }
    Ok(result)
}

#[async_trait]
impl SqlExecutor for Database {
    async fn execute(&self, sql: &str, params: Params) -> SqliteResult<()> {
        let query = SqlQuery::new(sql).with_params(params);
        self.with_connection(query, run_execute).await
    }

    async fn fetch_all(&self, sql: &str, params: Params) -> SqliteResult<Vec<Row>> {
        let query = SqlQuery::new(sql).with_params(params);
        self.with_connection(query, |conn, query| run_query(conn, query, None))
            .await
    }

    async fn fetch_one(&self, sql: &str, params: Params) -> SqliteResult<Option<Row>> {
        let query = SqlQuery::new(sql).with_params(params);
        let rows = self
            .with_connection(query, |conn, query| run_query(conn, query, Some(1)))
            .await?;
        Ok(rows.into_iter().next())
    }
}
