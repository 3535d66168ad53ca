//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shop It                                │
//! │                                                                         │
//! │  Presentation layer           Rust storefront                           │
//! │  ──────────────────           ───────────────                           │
//! │                                                                         │
//! │  place_order(address)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Blank field? ──── ValidationError::MissingFields ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Server down? ──── RemoteError::Http ───────────── AppError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_FAILURE", "message": "Please fill in: city" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal and none are retried. The UI shows the message
//! and leaves the user where they were.

use serde::Serialize;
use shopit_core::{CoreError, ValidationError};
use shopit_db::DbError;
use shopit_remote::RemoteError;

/// Result type alias for storefront commands.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Login with an unknown email/password pair
    InvalidCredentials,

    /// Registration with an email that is already taken
    DuplicateUser,

    /// The REST endpoint could not be reached or answered badly
    NetworkFailure,

    /// Incomplete address, empty cart, malformed signup input
    ValidationFailure,

    /// The payment widget script did not load
    PaymentScriptLoadFailure,

    /// Local database failure
    StorageError,

    /// Record missing on the server
    NotFound,

    /// Everything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationFailure, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::NetworkFailure, message)
    }

    pub fn payment_script(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::PaymentScriptLoadFailure, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentials => {
                AppError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
            }
            CoreError::DuplicateUser { email } => AppError::new(
                ErrorCode::DuplicateUser,
                format!("An account with {} already exists", email),
            ),
            CoreError::EmptyCart => AppError::validation("Your cart is empty"),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } if field.ends_with("email") => {
                CoreError::DuplicateUser { email: value }.into()
            }
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::StorageError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::NotFound { entity, id } => {
                AppError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Local storage is unavailable")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::StorageError, "Local storage is busy")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database operation failed: {}", other);
                AppError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(what) => {
                AppError::new(ErrorCode::NotFound, format!("Not found: {}", what))
            }
            RemoteError::InvalidBaseUrl(_) | RemoteError::ClientBuild(_) => {
                tracing::error!("HTTP client misconfigured: {}", err);
                AppError::internal(err.to_string())
            }
            other => {
                tracing::warn!("Request failed: {}", other);
                AppError::network("Could not reach the store. Please check your connection.")
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
