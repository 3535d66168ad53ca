//! # Error Types
//!
//! Domain-specific error types for shopit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopit-core errors (this file)                                        │
//! │  ├── CoreError        - Auth and checkout rule failures                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shopit-db errors      → DbError                                       │
//! │  shopit-remote errors  → RemoteError                                   │
//! │  storefront errors     → AppError (what the UI sees)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → UI notification        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart and wishlist reducers never fail, so nothing here is produced by
//! them. Every variant originates at a boundary.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No stored user matches both the email and the password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A user with this email is already registered.
    #[error("User already exists: {email}")]
    DuplicateUser { email: String },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Several required fields are missing or blank.
    #[error("Please fill in: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Invalid format (e.g. email without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
