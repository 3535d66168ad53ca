//! # Auth Commands
//!
//! Register, login and logout. A successful register or login signs the
//! session in, which persists it across restarts.

use shopit_core::AuthSession;
use tracing::debug;

use crate::error::AppResult;
use crate::services::MockAuthService;
use crate::state::SessionState;

pub async fn register(
    auth: &MockAuthService,
    session: &SessionState,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<AuthSession> {
    debug!("register command");
    let signed_in = auth.register(name, email, password).await?;
    session.sign_in(signed_in.clone()).await;
    Ok(signed_in)
}

pub async fn login(
    auth: &MockAuthService,
    session: &SessionState,
    email: &str,
    password: &str,
) -> AppResult<AuthSession> {
    debug!("login command");
    let signed_in = auth.login(email, password).await?;
    session.sign_in(signed_in.clone()).await;
    Ok(signed_in)
}

pub async fn logout(session: &SessionState) {
    debug!("logout command");
    session.sign_out().await;
}

pub fn current_session(session: &SessionState) -> Option<AuthSession> {
    session.current()
}
