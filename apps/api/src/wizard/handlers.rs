use axum::{
    extract::{Multipart, Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{self, ColorScheme, PlanInfo, TemplateInfo};
use super::guard::enforce;
use super::site::{self, ShareLinks};
use super::upload::{self, MAX_UPLOAD_BYTES};
use super::{Navigation, View};
use crate::auth::CurrentUser;
use crate::dashboard::{self, DashboardStats};
use crate::errors::AppError;
use crate::notify::Notice;
use crate::processing::ProcessingStatus;
use crate::session::{
    CredentialRecord, Customization, ParsedResume, PlanId, SessionState, TemplateId,
    UploadedFile, WebsiteRecord,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
}

/// Content of one protected view, tagged with the view's name.
#[derive(Serialize)]
#[serde(tag = "view", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ViewPayload {
    Dashboard {
        user: CredentialRecord,
        query: Option<String>,
        websites: Vec<WebsiteRecord>,
        stats: DashboardStats,
    },
    Upload {
        accepted_types: Vec<&'static str>,
        max_size_bytes: u64,
        uploaded_file: Option<UploadedFile>,
    },
    Pricing {
        plans: &'static [PlanInfo],
        uploaded_file: Option<UploadedFile>,
        selected_plan: Option<PlanId>,
    },
    Processing {
        uploaded_file: Option<UploadedFile>,
        status: ProcessingStatus,
    },
    Templates {
        templates: &'static [TemplateInfo],
        resume: ParsedResume,
        selected_template: Option<TemplateId>,
    },
    Preview {
        resume: ParsedResume,
        template: &'static TemplateInfo,
        color_schemes: &'static [ColorScheme],
    },
    Success {
        website: WebsiteRecord,
        website_url: String,
        share_links: ShareLinks,
    },
}

#[derive(Serialize)]
pub struct LeaveResponse {
    pub view: View,
    pub disposed: bool,
}

#[derive(Serialize)]
pub struct SuccessActionResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub struct PlanRequest {
    pub plan: PlanId,
}

#[derive(Deserialize)]
pub struct TemplateRequest {
    pub template: TemplateId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub color_scheme: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Views
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/views/:view
pub async fn handle_get_view(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    session: SessionState,
    Path(view): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ViewPayload>, AppError> {
    let view: View = view.parse().map_err(AppError::NotFound)?;
    if view != View::Processing {
        leave_processing(&state, &session);
    }
    enforce(view, &session).await?;

    let payload = match view {
        View::Dashboard => dashboard_view(user, &session, query.q).await,
        View::Upload => ViewPayload::Upload {
            accepted_types: upload::ACCEPTED_TYPES.iter().map(|(mime, _)| *mime).collect(),
            max_size_bytes: MAX_UPLOAD_BYTES,
            uploaded_file: session.uploaded_file().await,
        },
        View::Pricing => ViewPayload::Pricing {
            plans: catalog::PLANS,
            uploaded_file: session.uploaded_file().await,
            selected_plan: session.selected_plan().await,
        },
        View::Processing => ViewPayload::Processing {
            uploaded_file: session.uploaded_file().await,
            status: state.processing.enter(&session),
        },
        View::Templates => ViewPayload::Templates {
            templates: catalog::TEMPLATES,
            resume: require(session.parsed_resume().await, View::Upload)?,
            selected_template: session.selected_template().await,
        },
        View::Preview => {
            let template = catalog::template(require(
                session.selected_template().await,
                View::Templates,
            )?);
            ViewPayload::Preview {
                resume: require(session.parsed_resume().await, View::Templates)?,
                template,
                color_schemes: template.color_schemes,
            }
        }
        View::Success => success_view(&state, &session).await?,
        View::Login | View::Register => {
            return Err(AppError::NotFound(format!(
                "'{view}' is served at {}",
                view.location()
            )))
        }
    };

    Ok(Json(payload))
}

/// DELETE /api/v1/views/:view
/// Leaving the Processing view cancels its run. No other view holds resources.
pub async fn handle_leave_view(
    State(state): State<AppState>,
    session: SessionState,
    Path(view): Path<String>,
) -> Result<Json<LeaveResponse>, AppError> {
    let view: View = view.parse().map_err(AppError::NotFound)?;
    let disposed = view == View::Processing && state.processing.dispose(session.profile());
    Ok(Json(LeaveResponse { view, disposed }))
}

/// Entering any other view tears down an open Processing view.
fn leave_processing(state: &AppState, session: &SessionState) {
    if state.processing.dispose(session.profile()) {
        info!(profile = %session.profile(), "Left the Processing view");
    }
}

async fn dashboard_view(
    user: CredentialRecord,
    session: &SessionState,
    query: Option<String>,
) -> ViewPayload {
    let all = session.websites().await;
    let stats = dashboard::compute_stats(&all);
    let websites = dashboard::search(&all, query.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    ViewPayload::Dashboard {
        user,
        query,
        websites,
        stats,
    }
}

/// Appends a fresh website record on every activation.
async fn success_view(state: &AppState, session: &SessionState) -> Result<ViewPayload, AppError> {
    let customization = require(session.customization().await, View::Dashboard)?;
    let resume = require(session.parsed_resume().await, View::Dashboard)?;

    let website = site::website_record(&resume, &customization, &state.config.site_domain);
    session.append_website(website.clone()).await?;
    info!(
        profile = %session.profile(),
        website_id = %website.id,
        url = %website.url,
        "Website deployed"
    );

    let share_links = site::share_links(&website.url)?;
    Ok(ViewPayload::Success {
        website_url: format!("https://{}", website.url),
        website,
        share_links,
    })
}

/// A key that passed its guard can still vanish before it is read.
fn require<T>(value: Option<T>, fallback: View) -> Result<T, AppError> {
    value.ok_or(AppError::MissingPrerequisite { redirect: fallback })
}

// ────────────────────────────────────────────────────────────────────────────
// Actions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/wizard/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    session: SessionState,
    mut multipart: Multipart,
) -> Result<Json<Navigation>, AppError> {
    enforce(View::Upload, &session).await?;
    let profile = session.profile();

    let Some(file) = upload::read_file_field(&mut multipart).await? else {
        let message = "Please select a file first".to_string();
        state.notifier.notify(profile, Notice::Error(message.clone()));
        return Err(AppError::Validation(message));
    };

    let mime_type = match upload::validate(&file) {
        Ok(mime) => mime,
        Err(reason) => {
            state
                .notifier
                .notify(profile, Notice::Error(reason.message().to_string()));
            return Err(AppError::UnsupportedFile(reason));
        }
    };

    session
        .set_uploaded_file(&UploadedFile {
            name: file.name.clone(),
            size: file.size,
            mime_type: mime_type.to_string(),
            uploaded_at: Utc::now(),
        })
        .await?;
    info!(%profile, file = %file.name, size = file.size, "Resume uploaded");
    // A new file starts a fresh processing run.
    leave_processing(&state, &session);
    state.notifier.notify(
        profile,
        Notice::Success("Resume uploaded successfully!".to_string()),
    );

    Ok(Json(Navigation::to(View::Pricing)))
}

/// POST /api/v1/wizard/pricing
pub async fn handle_select_plan(
    State(state): State<AppState>,
    session: SessionState,
    Json(req): Json<PlanRequest>,
) -> Result<Json<Navigation>, AppError> {
    leave_processing(&state, &session);
    enforce(View::Pricing, &session).await?;

    session.set_selected_plan(req.plan).await?;
    let plan = catalog::plan(req.plan);
    info!(profile = %session.profile(), plan = plan.id.as_str(), "Plan selected");
    state.notifier.notify(
        session.profile(),
        Notice::Success(format!("{} plan selected!", plan.name)),
    );

    Ok(Json(Navigation::to(View::Processing)))
}

/// POST /api/v1/wizard/templates
pub async fn handle_select_template(
    State(state): State<AppState>,
    session: SessionState,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<Navigation>, AppError> {
    leave_processing(&state, &session);
    enforce(View::Templates, &session).await?;

    session.set_selected_template(req.template).await?;
    info!(profile = %session.profile(), template = %req.template, "Template selected");

    Ok(Json(Navigation::to(View::Preview)))
}

/// POST /api/v1/wizard/preview
pub async fn handle_deploy(
    State(state): State<AppState>,
    session: SessionState,
    Json(req): Json<DeployRequest>,
) -> Result<Json<Navigation>, AppError> {
    leave_processing(&state, &session);
    enforce(View::Preview, &session).await?;
    let template = require(session.selected_template().await, View::Templates)?;

    let scheme = catalog::color_scheme(template, &req.color_scheme).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown color scheme '{}' for template {template}",
            req.color_scheme
        ))
    })?;

    session
        .set_customization(&Customization {
            template,
            color_scheme: scheme.id.to_string(),
            deployed_at: Utc::now(),
        })
        .await?;
    info!(
        profile = %session.profile(),
        %template,
        color_scheme = scheme.id,
        "Website customization saved"
    );

    Ok(Json(Navigation::to(View::Success)))
}

/// POST /api/v1/wizard/success/copy
/// Hands the site URL to the client's clipboard.
pub async fn handle_copy_url(
    State(state): State<AppState>,
    session: SessionState,
) -> Result<Json<SuccessActionResponse>, AppError> {
    enforce(View::Success, &session).await?;
    let resume = require(session.parsed_resume().await, View::Dashboard)?;

    let url = format!("https://{}", site::site_host(&resume, &state.config.site_domain));
    let message = "URL copied to clipboard!";
    state
        .notifier
        .notify(session.profile(), Notice::Success(message.to_string()));

    Ok(Json(SuccessActionResponse {
        message,
        url: Some(url),
    }))
}

/// POST /api/v1/wizard/success/download
pub async fn handle_download_package(
    State(state): State<AppState>,
    session: SessionState,
) -> Result<Json<SuccessActionResponse>, AppError> {
    enforce(View::Success, &session).await?;

    let message = "Website HTML package will be ready for download shortly!";
    info!(profile = %session.profile(), "HTML package requested");
    state
        .notifier
        .notify(session.profile(), Notice::Success(message.to_string()));

    Ok(Json(SuccessActionResponse { message, url: None }))
}
