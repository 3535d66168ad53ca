//! # Session State
//!
//! The signed-in user, if any. Persisted in the single-row `session` table
//! so a restart keeps the user signed in.
//!
//! Sign-in and sign-out hold `write_lock` across the memory update and the
//! write, so the stored row always matches the last change in memory.

use std::sync::{Mutex, PoisonError};

use shopit_core::{AuthSession, User};
use shopit_db::Database;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct SessionState {
    current: Mutex<Option<AuthSession>>,
    db: Database,
    write_lock: AsyncMutex<()>,
}

impl SessionState {
    /// Builds the state from the persisted session.
    pub async fn hydrate(db: Database) -> Self {
        let current = match db.session().load().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Failed to load persisted session: {}. Starting signed out.", e);
                None
            }
        };

        info!(signed_in = current.is_some(), "Session hydrated");

        SessionState {
            current: Mutex::new(current),
            db,
            write_lock: AsyncMutex::new(()),
        }
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|s| s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }

    /// Replaces the current session and persists it.
    pub async fn sign_in(&self, session: AuthSession) {
        debug!(user_id = %session.user.id, "Signing in");
        let _write = self.write_lock.lock().await;

        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());

        if let Err(e) = self.db.session().save(&session).await {
            warn!("Failed to persist session: {}", e);
        }
    }

    /// Clears the current session and its persisted copy.
    pub async fn sign_out(&self) {
        let _write = self.write_lock.lock().await;
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(session) = previous {
            debug!(user_id = %session.user.id, "Signing out");
        }

        if let Err(e) = self.db.session().clear().await {
            warn!("Failed to clear persisted session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopit_db::DbConfig;

    fn session() -> AuthSession {
        session_for("u1", "Al")
    }

    fn session_for(id: &str, name: &str) -> AuthSession {
        AuthSession::issue(User {
            id: id.into(),
            name: name.into(),
            email: format!("{}@x.com", id),
        })
    }

    #[tokio::test]
    async fn test_sign_in_persists() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = SessionState::hydrate(db.clone()).await;
        assert!(!state.is_signed_in());

        state.sign_in(session()).await;

        let rehydrated = SessionState::hydrate(db).await;
        assert_eq!(rehydrated.current(), Some(session()));
        assert_eq!(rehydrated.user().map(|u| u.name), Some("Al".to_string()));
    }

    #[tokio::test]
    async fn test_sign_out_clears_storage() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = SessionState::hydrate(db.clone()).await;
        state.sign_in(session()).await;

        state.sign_out().await;

        assert!(!state.is_signed_in());
        assert!(db.session().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_interleaved_writes_keep_storage_in_step() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = SessionState::hydrate(db.clone()).await;

        for _ in 0..10 {
            tokio::join!(
                state.sign_in(session_for("u1", "Al")),
                state.sign_out(),
                state.sign_in(session_for("u2", "Bo")),
            );
            assert_eq!(db.session().load().await.unwrap(), state.current());

            tokio::join!(state.sign_in(session_for("u3", "Cy")), state.sign_out());
            assert_eq!(db.session().load().await.unwrap(), state.current());
        }
    }
}
