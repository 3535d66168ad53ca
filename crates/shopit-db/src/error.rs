//! # Storage Errors
//!
//! ```text
//! sqlx::Error ──────► DbError ──────► AppError (storefront)
//!   RowNotFound         NotFound         NOT_FOUND
//!   UNIQUE failed       UniqueViolation  DUPLICATE_USER (users.email)
//!   PoolTimedOut        PoolExhausted    STORAGE_ERROR
//!   PoolClosed / Io     ConnectionFailed STORAGE_ERROR
//!   anything else       QueryFailed      STORAGE_ERROR
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// `field` is the `table.column` SQLite names in the constraint message.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Migration failed: {0}")]
    MigrationFailed(#[from] sqlx::migrate::MigrateError),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A product could not be encoded for the wishlist table.
    #[error("Could not encode {entity}: {source}")]
    Payload {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Unique violation on `field` carrying the offending value.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }
}

/// Column named by "UNIQUE constraint failed: users.email".
fn constrained_column(message: &str) -> String {
    message
        .rsplit(": ")
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                // Callers that know the value re-tag it with `duplicate`
                ErrorKind::UniqueViolation => {
                    DbError::duplicate(constrained_column(db_err.message()), "unknown")
                }
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::QueryFailed(other.to_string()),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_pool_closed_is_connection_failure() {
        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_constrained_column() {
        assert_eq!(
            constrained_column("UNIQUE constraint failed: users.email"),
            "users.email"
        );
    }

    #[test]
    fn test_duplicate_helper() {
        let err = DbError::duplicate("users.email", "a@x.com");
        assert!(err.is_unique_violation());
        assert_eq!(
            err.to_string(),
            "Duplicate users.email: 'a@x.com' already exists"
        );
    }
}
