//! Error types for the facade.
//!
//! Every operation returns [`SqliteError`] via [`SqliteResult`]. The engine
//! error is never rewritten; it stays reachable through `source()` and is
//! classified by [`SqliteError::kind`].

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Alias for `Result<T, SqliteError>`.
pub type SqliteResult<T> = Result<T, SqliteError>;

/// Errors surfaced by facade operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// The database file could not be opened.
    #[error("failed to open database at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Preparing, binding or running the statement failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The handle reported an error while being closed.
    #[error("failed to close database handle: {source}")]
    Close {
        #[source]
        source: rusqlite::Error,
    },

    /// A row could not be mapped onto the requested record type.
    #[error("row decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The statement text was empty or only whitespace.
    #[error("empty statement")]
    EmptyStatement,

    /// The blocking task running the statement was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for SqliteError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

/// Coarse classification of a [`SqliteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, inaccessible or not a database.
    Open,
    /// Syntax error, unknown table or column, wrong column count.
    Statement,
    /// UNIQUE, NOT NULL, CHECK, PRIMARY KEY or FOREIGN KEY violation.
    Constraint,
    /// Number of bound parameters differs from the placeholders.
    Arity,
    /// The file is locked by another writer.
    Busy,
    /// Row to record mapping failed.
    Decode,
    Other,
}

impl SqliteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } => ErrorKind::Open,
            Self::Sqlite(err) | Self::Close { source: err } => classify(err),
            Self::EmptyStatement => ErrorKind::Statement,
            Self::Decode(_) => ErrorKind::Decode,
            Self::TaskJoin(_) => ErrorKind::Other,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.kind() == ErrorKind::Constraint
    }
}

fn classify(err: &rusqlite::Error) -> ErrorKind {
    match err {
        rusqlite::Error::InvalidParameterCount(_, _) => ErrorKind::Arity,
        rusqlite::Error::ExecuteReturnedResults | rusqlite::Error::MultipleStatement => {
            ErrorKind::Statement
        }
        rusqlite::Error::SqliteFailure(failure, _) => classify_code(failure.code),
        // syntax errors reported with an offset into the SQL text
        rusqlite::Error::SqlInputError { error, .. } => classify_code(error.code),
        _ => ErrorKind::Other,
    }
}

fn classify_code(code: ErrorCode) -> ErrorKind {
    match code {
        ErrorCode::ConstraintViolation => ErrorKind::Constraint,
        ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => ErrorKind::Busy,
        ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied => {
            ErrorKind::Open
        }
        ErrorCode::Unknown => ErrorKind::Statement,
        _ => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), None)
    }

    #[test]
    fn classifies_engine_failures() {
        let constraint = SqliteError::from(failure(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE));
        assert_eq!(constraint.kind(), ErrorKind::Constraint);
        assert!(constraint.is_constraint_violation());

        let busy = SqliteError::from(failure(rusqlite::ffi::SQLITE_BUSY));
        assert_eq!(busy.kind(), ErrorKind::Busy);

        let syntax = SqliteError::from(failure(rusqlite::ffi::SQLITE_ERROR));
        assert_eq!(syntax.kind(), ErrorKind::Statement);
    }

    #[test]
    fn classifies_input_error_with_offset_as_statement() {
        let err = SqliteError::from(rusqlite::Error::SqlInputError {
            error: rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            msg: "near \"SELEC\": syntax error".to_string(),
            sql: "SELEC 1".to_string(),
            offset: 0,
        });
        assert_eq!(err.kind(), ErrorKind::Statement);
    }

    #[test]
    fn empty_statement_is_statement_kind() {
        assert_eq!(SqliteError::EmptyStatement.kind(), ErrorKind::Statement);
    }

    #[test]
    fn classifies_parameter_count_as_arity() {
        let err = SqliteError::from(rusqlite::Error::InvalidParameterCount(1, 2));
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn open_error_keeps_path_in_message() {
        let err = SqliteError::Open {
            path: PathBuf::from("/nowhere/app.db"),
            source: failure(rusqlite::ffi::SQLITE_CANTOPEN),
        };
        assert_eq!(err.kind(), ErrorKind::Open);
        assert!(err.to_string().contains("/nowhere/app.db"));
    }
}
