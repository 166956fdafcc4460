use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

use super::AuthGate;
use crate::errors::AppError;
use crate::session::{CredentialRecord, SessionState};

/// The authenticated user, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub CredentialRecord);

/// Runs before every protected handler. An unauthenticated profile is
/// redirected to the login view and the handler never runs.
pub async fn require_auth(
    session: SessionState,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = match AuthGate::new(&session).require().await {
        Ok(user) => user,
        Err(e) => {
            info!(
                profile = %session.profile(),
                path = %request.uri().path(),
                "Unauthenticated request, redirecting to login"
            );
            return Err(e);
        }
    };
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
