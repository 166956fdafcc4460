use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::gate::{DEMO_EMAIL, DEMO_PASSWORD};
use super::{AuthGate, AuthState};
use crate::errors::AppError;
use crate::notify::Notice;
use crate::session::{CredentialRecord, SessionState};
use crate::state::AppState;
use crate::wizard::{Navigation, View};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct DemoCredentials {
    pub email: &'static str,
    pub password: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub view: View,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CredentialRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_credentials: Option<DemoCredentials>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: CredentialRecord,
    #[serde(flatten)]
    pub navigation: Navigation,
}

async fn entry_view(view: View, session: &SessionState) -> EntryView {
    let user = match AuthGate::new(session).state().await {
        AuthState::Authenticated(user) => Some(user),
        AuthState::Unauthenticated => None,
    };
    EntryView {
        view,
        authenticated: user.is_some(),
        user,
        demo_credentials: (view == View::Login).then_some(DemoCredentials {
            email: DEMO_EMAIL,
            password: DEMO_PASSWORD,
        }),
    }
}

/// GET /api/v1/auth/login
pub async fn handle_login_view(session: SessionState) -> Json<EntryView> {
    Json(entry_view(View::Login, &session).await)
}

/// GET /api/v1/auth/register
pub async fn handle_register_view(session: SessionState) -> Json<EntryView> {
    Json(entry_view(View::Register, &session).await)
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    session: SessionState,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let profile = session.profile();
    match AuthGate::new(&session).login(req.email.trim(), &req.password).await {
        Ok(user) => {
            state
                .notifier
                .notify(profile, Notice::Success("Welcome back!".to_string()));
            Ok(Json(AuthResponse {
                user,
                navigation: Navigation::to(View::Dashboard),
            }))
        }
        Err(e) => {
            state.notifier.notify(profile, Notice::Error(failure_notice(&e)));
            Err(e)
        }
    }
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    session: SessionState,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let profile = session.profile();
    let result = AuthGate::new(&session)
        .register(&req.name, &req.email, &req.password)
        .await;
    match result {
        Ok(user) => {
            state.notifier.notify(
                profile,
                Notice::Success("Account created successfully!".to_string()),
            );
            Ok(Json(AuthResponse {
                user,
                navigation: Navigation::to(View::Dashboard),
            }))
        }
        Err(e) => {
            state.notifier.notify(profile, Notice::Error(failure_notice(&e)));
            Err(e)
        }
    }
}

/// User-facing text for a failed login or registration.
fn failure_notice(e: &AppError) -> String {
    match e {
        AppError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    session: SessionState,
) -> Result<Json<Navigation>, AppError> {
    AuthGate::new(&session).logout().await?;
    state.processing.dispose(session.profile());
    state.notifier.notify(
        session.profile(),
        Notice::Success("Logged out successfully".to_string()),
    );
    Ok(Json(Navigation::to(View::Login)))
}
