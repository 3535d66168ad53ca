//! # Mock Auth Service
//!
//! Register and login against the local user list. Tokens are synthetic
//! (`mock-token-{userId}`) and nothing is verified server-side.
//!
//! ```text
//! register(name, email, pw)
//!   validate ──► email taken? ──yes──► DuplicateUser
//!                   │ no
//!                   ▼
//!             insert user ──► AuthSession::issue
//!
//! login(email, pw)
//!   email + pw match a record? ──no──► InvalidCredentials
//!                   │ yes
//!                   ▼
//!             AuthSession::issue
//! ```

use shopit_core::validation::{validate_email, validate_password, validate_registration};
use shopit_core::{AuthSession, CoreError, ValidationError};
use shopit_db::{Database, NewUser};
use tracing::{debug, info};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct MockAuthService {
    db: Database,
}

impl MockAuthService {
    pub fn new(db: Database) -> Self {
        MockAuthService { db }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = validate_registration(name, email, password)?;
        debug!(email = %email, "Registering user");

        let users = self.db.users();
        if users.find_by_email(&email).await?.is_some() {
            return Err(CoreError::DuplicateUser { email }.into());
        }

        // A concurrent registration still lands on the UNIQUE index and maps
        // to DuplicateUser through From<DbError>.
        let record = users
            .insert(&NewUser {
                name: name.trim().to_string(),
                email,
                password: password.to_string(),
            })
            .await?;

        info!(user_id = %record.id, "User registered");
        Ok(AuthSession::issue(record.to_user()))
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = match validate_email(email) {
            Ok(email) => email,
            Err(ValidationError::InvalidFormat { .. }) => {
                return Err(CoreError::InvalidCredentials.into())
            }
            Err(e) => return Err(e.into()),
        };
        validate_password(password)?;

        debug!(email = %email, "Logging in");

        let record = self
            .db
            .users()
            .find_by_credentials(&email, password)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        info!(user_id = %record.id, "User logged in");
        Ok(AuthSession::issue(record.to_user()))
    }
}
