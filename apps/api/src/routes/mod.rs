pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{handlers as auth, require_auth};
use crate::state::AppState;
use crate::wizard::handlers as wizard;
use crate::wizard::upload::MAX_UPLOAD_BYTES;

/// Multipart framing on top of the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES as usize + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Every route here passes the auth gate before its handler runs.
    let protected = Router::new()
        .route(
            "/api/v1/views/:view",
            get(wizard::handle_get_view).delete(wizard::handle_leave_view),
        )
        .route(
            "/api/v1/wizard/upload",
            post(wizard::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/wizard/pricing", post(wizard::handle_select_plan))
        .route(
            "/api/v1/wizard/templates",
            post(wizard::handle_select_template),
        )
        .route("/api/v1/wizard/preview", post(wizard::handle_deploy))
        .route("/api/v1/wizard/success/copy", post(wizard::handle_copy_url))
        .route(
            "/api/v1/wizard/success/download",
            post(wizard::handle_download_package),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/auth/login",
            get(auth::handle_login_view).post(auth::handle_login),
        )
        .route(
            "/api/v1/auth/register",
            get(auth::handle_register_view).post(auth::handle_register),
        )
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::notify::{Notice, RecordingNotifier};
    use crate::processing::{ProcessingRegistry, ProcessingTiming};
    use crate::session::{SessionKey, SessionState};
    use crate::store::{KeyValueStore, MemoryStore};

    const BOUNDARY: &str = "resume2website-test-boundary";

    struct TestApp {
        router: Router,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<RecordingNotifier>,
        processing: Arc<ProcessingRegistry>,
        profile: Uuid,
    }

    struct Reply {
        status: StatusCode,
        headers: HeaderMap,
        body: Value,
    }

    impl TestApp {
        fn new() -> Self {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            let notifier = Arc::new(RecordingNotifier::default());
            let config = Config {
                processing: ProcessingTiming {
                    duration: Duration::from_millis(800),
                    tick: Duration::from_millis(100),
                    navigate_delay: Duration::from_millis(200),
                },
                ..Config::default()
            };
            let state = AppState::new(store.clone(), config, notifier.clone());
            let processing = state.processing.clone();
            Self {
                router: build_router(state),
                store,
                notifier,
                processing,
                profile: Uuid::new_v4(),
            }
        }

        fn session(&self) -> SessionState {
            SessionState::new(self.store.clone(), self.profile)
        }

        async fn send(&self, request: Request<Body>) -> Reply {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            Reply {
                status,
                headers,
                body,
            }
        }

        async fn get(&self, path: &str) -> Reply {
            self.send(
                Request::get(path)
                    .header("x-profile-id", self.profile.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
        }

        async fn delete(&self, path: &str) -> Reply {
            self.send(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(path)
                    .header("x-profile-id", self.profile.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
        }

        async fn post_json(&self, path: &str, body: Value) -> Reply {
            self.send(
                Request::post(path)
                    .header("x-profile-id", self.profile.to_string())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
        }

        async fn upload(&self, filename: &str, mime: &str, data: &[u8]) -> Reply {
            let mut body = Vec::new();
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

            self.send(
                Request::post("/api/v1/wizard/upload")
                    .header("x-profile-id", self.profile.to_string())
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
        }

        async fn demo_login(&self) {
            let reply = self
                .post_json(
                    "/api/v1/auth/login",
                    json!({"email": "demo@resume2website.com", "password": "demo123"}),
                )
                .await;
            assert_eq!(reply.status, StatusCode::OK);
        }
    }

    fn assert_redirect(reply: &Reply, location: &str) {
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.headers.get(header::LOCATION).unwrap(), location);
        assert!(reply.body.get("view").is_none(), "redirect leaked view content");
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let reply = app
            .send(Request::get("/health").body(Body::empty()).unwrap())
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["status"], "ok");
        assert_eq!(reply.body["store"], "memory");
    }

    #[tokio::test]
    async fn test_missing_profile_header_is_bad_request() {
        let app = TestApp::new();
        let reply = app
            .send(
                Request::get("/api/v1/views/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_protected_views_redirect_to_login_when_unauthenticated() {
        let app = TestApp::new();
        for view in ["dashboard", "upload", "templates", "success"] {
            let reply = app.get(&format!("/api/v1/views/{view}")).await;
            assert_redirect(&reply, "/api/v1/auth/login");
        }
        let reply = app
            .post_json("/api/v1/wizard/pricing", json!({"plan": "pro"}))
            .await;
        assert_redirect(&reply, "/api/v1/auth/login");
        assert!(app.session().selected_plan().await.is_none());
    }

    #[tokio::test]
    async fn test_login_entry_view_reports_state() {
        let app = TestApp::new();
        let reply = app.get("/api/v1/auth/login").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["authenticated"], false);
        assert_eq!(reply.body["demoCredentials"]["email"], "demo@resume2website.com");

        app.demo_login().await;
        let reply = app.get("/api/v1/auth/register").await;
        assert_eq!(reply.body["authenticated"], true);
        assert_eq!(reply.body["user"]["id"], "demo-user");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = TestApp::new();
        let reply = app
            .post_json(
                "/api/v1/auth/login",
                json!({"email": "demo@resume2website.com", "password": "nope"}),
            )
            .await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert!(app.session().current_user().await.is_none());
        assert_eq!(
            app.notifier.notices().last().unwrap().1,
            Notice::Error("Invalid email or password".to_string())
        );
    }

    #[tokio::test]
    async fn test_out_of_order_navigation_lands_on_earliest_step() {
        let app = TestApp::new();
        app.demo_login().await;

        for view in ["pricing", "processing", "templates"] {
            let reply = app.get(&format!("/api/v1/views/{view}")).await;
            assert_redirect(&reply, "/api/v1/views/upload");
        }
        let reply = app.get("/api/v1/views/preview").await;
        assert_redirect(&reply, "/api/v1/views/upload");
        let reply = app.get("/api/v1/views/success").await;
        assert_redirect(&reply, "/api/v1/views/dashboard");

        let reply = app
            .post_json("/api/v1/wizard/templates", json!({"template": "minimal-modern"}))
            .await;
        assert_redirect(&reply, "/api/v1/views/upload");
        assert!(!app.session().present(SessionKey::SelectedTemplate).await);
    }

    #[tokio::test]
    async fn test_unknown_view_is_not_found() {
        let app = TestApp::new();
        app.demo_login().await;
        let reply = app.get("/api/v1/views/checkout").await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_rejections_write_nothing() {
        let app = TestApp::new();
        app.demo_login().await;

        let reply = app.upload("photo.png", "image/png", b"\x89PNG").await;
        assert_eq!(reply.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            reply.body["error"]["message"],
            "Invalid file type. Please upload a PDF or DOCX file."
        );

        let too_big = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
        let reply = app.upload("resume.pdf", "application/pdf", &too_big).await;
        assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);

        assert!(app.session().uploaded_file().await.is_none());
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let app = TestApp::new();
        app.demo_login().await;

        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
        );
        let reply = app
            .send(
                Request::post("/api/v1/wizard/upload")
                    .header("x-profile-id", app.profile.to_string())
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body["error"]["message"], "Please select a file first");
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_wizard_flow() {
        let app = TestApp::new();
        app.demo_login().await;

        let reply = app
            .upload("resume.pdf", "application/pdf", b"%PDF-1.4 fake")
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["next"], "pricing");

        let reply = app.get("/api/v1/views/pricing").await;
        assert_eq!(reply.body["view"], "pricing");
        assert_eq!(reply.body["plans"].as_array().unwrap().len(), 3);

        let reply = app
            .post_json("/api/v1/wizard/pricing", json!({"plan": "pro"}))
            .await;
        assert_eq!(reply.body["location"], "/api/v1/views/processing");

        let reply = app.get("/api/v1/views/processing").await;
        assert_eq!(reply.body["view"], "processing");
        assert_eq!(reply.body["status"]["progress"], 0.0);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let reply = app.get("/api/v1/views/processing").await;
        assert_eq!(reply.body["status"]["completed"], true);
        assert_eq!(reply.body["status"]["progress"], 100.0);
        assert_eq!(reply.body["status"]["next"], "templates");

        let reply = app.delete("/api/v1/views/processing").await;
        assert_eq!(reply.body["disposed"], true);

        let reply = app.get("/api/v1/views/templates").await;
        assert_eq!(reply.body["view"], "templates");
        assert_eq!(reply.body["resume"]["personalInfo"]["name"], "Sarah Johnson");

        let reply = app
            .post_json("/api/v1/wizard/templates", json!({"template": "creative-portfolio"}))
            .await;
        assert_eq!(reply.body["next"], "preview");

        let reply = app.get("/api/v1/views/preview").await;
        assert_eq!(reply.body["template"]["id"], "creative-portfolio");
        assert_eq!(reply.body["colorSchemes"].as_array().unwrap().len(), 3);

        let reply = app
            .post_json("/api/v1/wizard/preview", json!({"colorScheme": "monochrome"}))
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(app.session().customization().await.is_none());

        let reply = app
            .post_json("/api/v1/wizard/preview", json!({"colorScheme": "vibrant"}))
            .await;
        assert_eq!(reply.body["next"], "success");

        let reply = app.get("/api/v1/views/success").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.body["website"]["url"],
            "sarah-johnson.resume2website.com"
        );
        assert_eq!(reply.body["website"]["template"], "creative-portfolio");
        assert!(reply.body["shareLinks"]["linkedin"]
            .as_str()
            .unwrap()
            .ends_with("https%3A%2F%2Fsarah-johnson.resume2website.com"));

        let reply = app.get("/api/v1/views/dashboard").await;
        assert_eq!(reply.body["stats"]["totalWebsites"], 1);
        assert_eq!(reply.body["websites"][0]["status"], "live");

        let reply = app.get("/api/v1/views/dashboard?q=no-such-site").await;
        assert_eq!(reply.body["websites"].as_array().unwrap().len(), 0);
        assert_eq!(reply.body["stats"]["totalWebsites"], 1);

        let notices: Vec<Notice> = app.notifier.notices().into_iter().map(|(_, n)| n).collect();
        assert!(notices.contains(&Notice::Success("Resume uploaded successfully!".to_string())));
        assert!(notices.contains(&Notice::Success("Pro plan selected!".to_string())));
    }

    #[tokio::test]
    async fn test_logout_locks_every_protected_view() {
        let app = TestApp::new();
        app.demo_login().await;
        assert_eq!(app.get("/api/v1/views/dashboard").await.status, StatusCode::OK);

        let reply = app.post_json("/api/v1/auth/logout", json!({})).await;
        assert_eq!(reply.body["next"], "login");

        for view in ["dashboard", "upload", "pricing", "preview"] {
            let reply = app.get(&format!("/api/v1/views/{view}")).await;
            assert_redirect(&reply, "/api/v1/auth/login");
        }
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict_and_keeps_store() {
        let app = TestApp::new();
        let reply = app
            .post_json(
                "/api/v1/auth/register",
                json!({"name": "Ada", "email": "ada@example.com", "password": "pw"}),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["user"]["name"], "Ada");
        assert!(reply.body["user"].get("passwordHash").is_none());
        app.post_json("/api/v1/auth/logout", json!({})).await;

        let key = format!("profile:{}:{}", app.profile, SessionKey::Users.as_str());
        let before = app.store.get(&key).await;

        let reply = app
            .post_json(
                "/api/v1/auth/register",
                json!({"name": "Eve", "email": "ada@example.com", "password": "x"}),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(app.store.get(&key).await, before);
        assert!(app.session().current_user().await.is_none());

        let reply = app
            .post_json(
                "/api/v1/auth/login",
                json!({"email": "ada@example.com", "password": "pw"}),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["user"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_profiles_do_not_share_sessions() {
        let app = TestApp::new();
        app.demo_login().await;

        let other = Uuid::new_v4();
        let reply = app
            .send(
                Request::get("/api/v1/views/dashboard")
                    .header("x-profile-id", other.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_redirect(&reply, "/api/v1/auth/login");
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_processing_mid_run_cancels_it() {
        let app = TestApp::new();
        app.demo_login().await;
        app.upload("resume.pdf", "application/pdf", b"%PDF-1.4 fake")
            .await;

        let reply = app.get("/api/v1/views/processing").await;
        assert_eq!(reply.body["view"], "processing");
        assert_eq!(app.processing.open_runs(), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;
        let reply = app.get("/api/v1/views/dashboard").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(app.processing.open_runs(), 0);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(!app.session().present(SessionKey::ParsedData).await);

        let reply = app.get("/api/v1/views/templates").await;
        assert_redirect(&reply, "/api/v1/views/upload");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wizard_action_elsewhere_cancels_processing() {
        let app = TestApp::new();
        app.demo_login().await;
        app.upload("resume.pdf", "application/pdf", b"%PDF-1.4 fake")
            .await;
        app.get("/api/v1/views/processing").await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        let reply = app
            .post_json("/api/v1/wizard/pricing", json!({"plan": "basic"}))
            .await;
        assert_eq!(reply.body["next"], "processing");
        assert_eq!(app.processing.open_runs(), 0);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(!app.session().present(SessionKey::ParsedData).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_copy_and_download_notify() {
        let app = TestApp::new();
        app.demo_login().await;

        let reply = app.post_json("/api/v1/wizard/success/copy", json!({})).await;
        assert_redirect(&reply, "/api/v1/views/dashboard");

        app.upload("resume.pdf", "application/pdf", b"%PDF-1.4 fake")
            .await;
        app.get("/api/v1/views/processing").await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        app.post_json("/api/v1/wizard/templates", json!({"template": "minimal-modern"}))
            .await;
        app.post_json("/api/v1/wizard/preview", json!({"colorScheme": "rose"}))
            .await;

        let reply = app.post_json("/api/v1/wizard/success/copy", json!({})).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["url"], "https://sarah-johnson.resume2website.com");

        let reply = app
            .post_json("/api/v1/wizard/success/download", json!({}))
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.get("url").is_none());

        let notices: Vec<Notice> = app.notifier.notices().into_iter().map(|(_, n)| n).collect();
        assert!(notices.contains(&Notice::Success("URL copied to clipboard!".to_string())));
        assert!(notices.contains(&Notice::Success(
            "Website HTML package will be ready for download shortly!".to_string()
        )));
    }

    #[tokio::test]
    async fn test_blank_registration_field_is_notified() {
        let app = TestApp::new();
        let reply = app
            .post_json(
                "/api/v1/auth/register",
                json!({"name": "  ", "email": "ada@example.com", "password": "pw"}),
            )
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            app.notifier.notices().last().unwrap().1,
            Notice::Error("name cannot be empty".to_string())
        );
    }
}
