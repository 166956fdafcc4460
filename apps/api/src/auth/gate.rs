//! Auth gate: a two-state machine (`Unauthenticated` / `Authenticated`)
//! derived from the current-session-user key on every request.
//!
//! Mock authentication only: the credential set lives in the profile's own
//! store namespace. No lockout, no rate limiting.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::session::{CredentialRecord, SessionState};

pub const DEMO_EMAIL: &str = "demo@resume2website.com";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_USER_ID: &str = "demo-user";
const DEMO_USER_NAME: &str = "Demo User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(CredentialRecord),
}

pub struct AuthGate<'a> {
    session: &'a SessionState,
}

impl<'a> AuthGate<'a> {
    pub fn new(session: &'a SessionState) -> Self {
        Self { session }
    }

    pub async fn state(&self) -> AuthState {
        match self.session.current_user().await {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        }
    }

    /// Admits only an authenticated profile.
    pub async fn require(&self) -> Result<CredentialRecord, AppError> {
        match self.state().await {
            AuthState::Authenticated(user) => Ok(user),
            AuthState::Unauthenticated => Err(AppError::Unauthenticated),
        }
    }

    /// A stored account with a verifying hash wins; otherwise the demo pair
    /// is always accepted.
    pub async fn login(&self, email: &str, password: &str) -> Result<CredentialRecord, AppError> {
        let stored = self.session.credentials().await;
        let mut matched = None;
        if let Some(candidate) = stored.into_iter().find(|u| u.email == email) {
            if let Some(hash) = candidate.password_hash.clone() {
                if verify_password(password.to_string(), hash).await? {
                    matched = Some(candidate);
                }
            }
        }

        let user = match matched {
            Some(user) => user,
            None if email == DEMO_EMAIL && password == DEMO_PASSWORD => demo_user(),
            None => return Err(AppError::InvalidCredentials),
        };

        self.session.set_current_user(&user).await?;
        info!(profile = %self.session.profile(), user_id = %user.id, "Login succeeded");
        Ok(user.without_password())
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<CredentialRecord, AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }

        let mut stored = self.session.credentials().await;
        if stored.iter().any(|u| u.email == email) {
            return Err(AppError::DuplicateAccount);
        }

        let record = CredentialRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: Some(hash_password(password.to_string()).await?),
            created_at: Utc::now(),
        };
        stored.push(record.clone());
        self.session.set_credentials(&stored).await?;
        self.session.set_current_user(&record).await?;

        info!(profile = %self.session.profile(), user_id = %record.id, "Account registered");
        Ok(record.without_password())
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.clear_current_user().await?;
        info!(profile = %self.session.profile(), "Logged out");
        Ok(())
    }
}

fn demo_user() -> CredentialRecord {
    CredentialRecord {
        id: DEMO_USER_ID.to_string(),
        name: DEMO_USER_NAME.to_string(),
        email: DEMO_EMAIL.to_string(),
        password_hash: None,
        created_at: Utc::now(),
    }
}
