//! # Validation Module
//!
//! Input checks run at the boundary before anything is stored or sent.
//!
//! ## Where Each Check Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register form ──► validate_registration                               │
//! │                      ├── validate_name                                 │
//! │                      ├── validate_email                                │
//! │                      └── validate_password                             │
//! │                                                                         │
//! │  Login form    ──► validate_email, validate_password                   │
//! │                                                                         │
//! │  Checkout      ──► validate_address (every field present)              │
//! │                                                                         │
//! │  Database      ──► UNIQUE(email) still catches duplicate users         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopit_core::validation::{validate_address, validate_email};
//! use shopit_core::Address;
//!
//! assert!(validate_email("a@x.com").is_ok());
//! assert!(validate_address(&Address::default()).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Address;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// Address
// =============================================================================

/// Checks that every address field is filled in.
///
/// All blank fields are reported together, in form order, so the form can
/// highlight them at once.
///
/// ## Example
/// ```rust
/// use shopit_core::validation::validate_address;
/// use shopit_core::{Address, ValidationError};
///
/// let address = Address {
///     name: "Asha".into(),
///     mobile: "9876543210".into(),
///     street: "12 MG Road".into(),
///     city: "Pune".into(),
///     zip: "411001".into(),
///     state: String::new(),
/// };
/// assert_eq!(
///     validate_address(&address),
///     Err(ValidationError::MissingFields { fields: vec!["state".into()] })
/// );
/// ```
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    let fields = [
        ("name", &address.name),
        ("mobile", &address.mobile),
        ("street", &address.street),
        ("city", &address.city),
        ("zip", &address.zip),
        ("state", &address.state),
    ];

    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields { fields: missing })
    }
}

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a display name: non-blank, at most 100 characters.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// Only the shape is checked: a non-empty local part, one `@`, and a
/// non-empty domain. Returns the trimmed, lowercased address that is used as
/// the lookup key.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_lowercase())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Passwords only need to be present; the auth store is a demo mock.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Validates the register form and returns the normalized email.
pub fn validate_registration(name: &str, email: &str, password: &str) -> ValidationResult<String> {
    validate_name(name)?;
    let email = validate_email(email)?;
    validate_password(password)?;
    Ok(email)
}

// =============================================================================
// Unit Tests
// =============================================================================
