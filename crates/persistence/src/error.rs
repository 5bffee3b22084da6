// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found for this caller.
    ResourceNotFound(i64),
    /// The requested event was not found for this caller.
    EventNotFound(i64),
    /// The database rejected a write on constraint grounds.
    ///
    /// This is the storage layer's second line of defense behind the
    /// boundary validation (referential integrity, range checks).
    ConstraintViolation(String),
    /// A stored row could not be decoded back into a domain value.
    CorruptRow {
        /// The table the row lives in.
        table: &'static str,
        /// The row's primary key.
        id: i64,
        /// What failed to decode.
        reason: String,
    },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ResourceNotFound(id) => write!(f, "Resource not found: {id}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::CorruptRow { table, id, reason } => {
                write!(f, "Corrupt row {id} in table '{table}': {reason}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(kind, info)
                if matches!(
                    kind,
                    diesel::result::DatabaseErrorKind::ForeignKeyViolation
                        | diesel::result::DatabaseErrorKind::CheckViolation
                        | diesel::result::DatabaseErrorKind::UniqueViolation
                        | diesel::result::DatabaseErrorKind::NotNullViolation
                ) =>
            {
                Self::ConstraintViolation(info.message().to_string())
            }
            diesel::result::Error::NotFound => {
                Self::QueryFailed(String::from("Record not found"))
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
