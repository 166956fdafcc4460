use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::wizard::upload::FileRejection;
use crate::wizard::View;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing here is fatal: every variant resolves to either a redirect or a
/// displayed message, with the profile's stored state left as it was.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required session key is absent or failed to decode.
    #[error("Missing prerequisite state, redirecting to {redirect}")]
    MissingPrerequisite { redirect: View },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account with this email already exists")]
    DuplicateAccount,

    #[error("Unsupported file: {0}")]
    UnsupportedFile(FileRejection),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingPrerequisite { redirect } => return redirect_to(*redirect),
            AppError::Unauthenticated => return redirect_to(View::Login),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            AppError::DuplicateAccount => (
                StatusCode::CONFLICT,
                "DUPLICATE_ACCOUNT",
                self.to_string(),
            ),
            AppError::UnsupportedFile(reason) => {
                let status = match reason {
                    FileRejection::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                    FileRejection::InvalidType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                };
                (status, reason.code(), reason.message().to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Full navigation to another view: `303 See Other` with the view's route in
/// `Location`. The body names the destination and carries no target content.
fn redirect_to(view: View) -> Response {
    let location = view.location();
    let body = Json(json!({
        "redirect": {
            "view": view,
            "location": location
        }
    }));
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location)],
        body,
    )
        .into_response()
}
