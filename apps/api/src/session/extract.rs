//! Request extractors: the caller's profile id and the session bound to it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionState;
use crate::state::AppState;

/// Header naming the browser profile whose state a request reads and writes.
pub const PROFILE_HEADER: &str = "x-profile-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ProfileId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PROFILE_HEADER)
            .ok_or_else(|| AppError::Validation(format!("{PROFILE_HEADER} header is required")))?
            .to_str()
            .map_err(|_| AppError::Validation(format!("{PROFILE_HEADER} must be ASCII")))?;
        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::Validation(format!("{PROFILE_HEADER} must be a UUID")))?;
        Ok(ProfileId(id))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionState {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ProfileId(profile) = ProfileId::from_request_parts(parts, state).await?;
        Ok(SessionState::new(state.store.clone(), profile))
    }
}
