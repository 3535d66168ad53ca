//! # User Repository
//!
//! Mock auth records. Passwords are stored as given: this store backs a demo
//! login and is not a security boundary.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shopit_core::User;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// The public view handed to the UI, without the password.
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Input for [`UserRepository::insert`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user with a fresh UUID.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the email is already registered.
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<UserRecord> {
        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %record.id, email = %record.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &record.email),
            other => other,
        })?;

        Ok(record)
    }

    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Finds the user whose email and password both match.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> DbResult<Option<UserRecord>> {
        debug!(email = %email, "Looking up credentials");

        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE email = ?1 AND password = ?2
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_user(name: &str, email: &str, password: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let record = repo.insert(&new_user("Al", "a@x.com", "pw")).await.unwrap();
        assert!(Uuid::parse_str(&record.id).is_ok());

        let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, record.id);
        assert_eq!(found.to_user().name, "Al");

        let by_id = repo.get_by_id(&record.id).await.unwrap();
        assert_eq!(by_id.map(|r| r.email), Some("a@x.com".to_string()));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.insert(&new_user("Al", "a@x.com", "pw")).await.unwrap();
        let err = repo
            .insert(&new_user("Al2", "a@x.com", "pw2"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.email");
                assert_eq!(value, "a@x.com");
            }
            other => panic!("expected UniqueViolation, got {:?}", other),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_credentials() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();
        repo.insert(&new_user("Al", "a@x.com", "pw")).await.unwrap();

        assert!(repo
            .find_by_credentials("a@x.com", "pw")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_credentials("a@x.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_credentials("b@x.com", "pw")
            .await
            .unwrap()
            .is_none());
    }
}
