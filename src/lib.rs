//! Async CRUD facade over a single SQLite file.
//!
//! # Intention
//!
//! - Run one statement per call: open a handle, execute, close.
//! - Expose `execute`, `fetch_all` and `fetch_one`, and build the CRUD verbs
//!   (`create_table`, `insert`, `update`, `delete`, `select_*`) on top of them.
//! - Bind values as parameters; interpolate only table, column, condition and
//!   ordering text supplied by the caller.
//!
//! # Architectural Boundaries
//!
//! - No pooling, caching, migrations or transactions. Locking between
//!   concurrent writers is left to SQLite.
//! - Engine errors are passed through, not translated.
//!
//! ```ignore
//! use sqlite_facade::{sql_params, Database, SqlExecutor, Value};
//!
//! let db = Database::open("app.db");
//! db.create_table("users", "id INTEGER PRIMARY KEY, name TEXT").await?;
//! db.insert("users", "id, name", vec![Value::from(1), Value::from("a")]).await?;
//! let rows = db.select_where("users", "id = ?", sql_params![1]).await?;
//! ```

pub mod error;
pub mod executor;
pub mod row;
pub mod sqlite;
pub mod statement;
pub mod value;

pub use error::{ErrorKind, SqliteError, SqliteResult};
pub use executor::SqlExecutor;
pub use row::Row;
pub use sqlite::{Database, SqlQuery, SqliteConfig};
pub use value::{Params, Value};
