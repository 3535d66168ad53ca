//! # Session Repository
//!
//! Holds at most one signed-in session (`slot = 1`). Saving replaces it,
//! logging out deletes it.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use shopit_core::{AuthSession, User};

#[derive(Debug, FromRow)]
struct SessionRow {
    token: String,
    user_id: String,
    user_name: String,
    user_email: String,
}

impl From<SessionRow> for AuthSession {
    fn from(row: SessionRow) -> Self {
        AuthSession {
            token: row.token,
            user: User {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Returns the persisted session, if any.
    pub async fn load(&self) -> DbResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT token, user_id, user_name, user_email
            FROM session
            WHERE slot = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSession::from))
    }

    /// Stores `session`, replacing any previous one.
    pub async fn save(&self, session: &AuthSession) -> DbResult<()> {
        debug!(user_id = %session.user.id, "Persisting session");

        sqlx::query(
            r#"
            INSERT INTO session (slot, token, user_id, user_name, user_email, created_at)
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(slot) DO UPDATE SET
                token = excluded.token,
                user_id = excluded.user_id,
                user_name = excluded.user_name,
                user_email = excluded.user_email,
                created_at = excluded.created_at
            "#,
        )
        .bind(&session.token)
        .bind(&session.user.id)
        .bind(&session.user.name)
        .bind(&session.user.email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes the persisted session. No-op when signed out.
    pub async fn clear(&self) -> DbResult<()> {
        debug!("Clearing persisted session");
        sqlx::query("DELETE FROM session")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn session(id: &str, name: &str) -> AuthSession {
        AuthSession::issue(User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@x.com", id),
        })
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.session();

        assert_eq!(repo.load().await.unwrap(), None);

        repo.save(&session("u1", "Al")).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(session("u1", "Al")));

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
        repo.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_replaces_previous_session() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.session();

        repo.save(&session("u1", "Al")).await.unwrap();
        repo.save(&session("u2", "Bo")).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.user.id, "u2");
        assert_eq!(loaded.token, "mock-token-u2");
    }
}
