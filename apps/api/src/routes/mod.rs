pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::accounts::handlers as accounts;
use crate::config::CorsOrigins;
use crate::jobs::handlers as jobs;
use crate::profiles::handlers as profiles;
use crate::recommendations::handlers as recommendations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/register", post(accounts::handle_register))
        .route("/users/:id", get(accounts::handle_get_user))
        .route(
            "/candidates/:user_id",
            post(profiles::handle_create_candidate)
                .get(profiles::handle_get_candidate)
                .put(profiles::handle_update_candidate),
        )
        .route(
            "/companies/:user_id",
            post(profiles::handle_create_company).get(profiles::handle_get_company),
        )
        .route("/jobs", get(jobs::handle_list_jobs))
        .route(
            "/jobs/:id",
            // POST takes a company id, GET a job id
            post(jobs::handle_create_job).get(jobs::handle_get_job),
        )
        .route(
            "/ai/job-recommendations/:user_id",
            post(recommendations::handle_job_recommendations),
        )
        .route(
            "/ai/candidate-recommendations/:company_id",
            post(recommendations::handle_candidate_recommendations),
        )
        .route(
            "/ai/course-recommendations/:user_id",
            post(recommendations::handle_course_recommendations),
        )
        .route(
            "/upload-cv/:user_id",
            post(profiles::handle_upload_cv).layer(DefaultBodyLimit::disable()),
        );

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .with_state(state)
}

/// CORS for the configured origins. Explicit origins may send credentials.
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {origin}");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::scripted::ScriptedChat;
    use crate::llm_client::ChatCompletion;
    use crate::mapper::to_document;
    use crate::models::job::Job;
    use crate::store::{DocumentStore, MemoryDocumentStore};

    fn app_with(llm: Arc<dyn ChatCompletion>) -> (Router, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState {
            store: store.clone(),
            llm,
        };
        (build_router(state), store)
    }

    fn app() -> (Router, Arc<MemoryDocumentStore>) {
        app_with(Arc::new(ScriptedChat::failing()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn register(app: &Router, email: &str, role: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/register",
            Some(json!({"email": email, "name": "Nguyễn Văn A", "role": role})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    async fn company_for(app: &Router) -> String {
        let user_id = register(app, "hr@techviet.com", "employer").await;
        let (status, body) = send(
            app,
            Method::POST,
            &format!("/api/companies/{user_id}"),
            Some(json!({
                "name": "TechViet Solutions",
                "description": "Công ty phần mềm",
                "industry": "Công nghệ thông tin",
                "size": "100-500",
                "location": "TP. Hồ Chí Minh",
                "website": "https://techviet.vn"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    fn job_body(title: &str) -> Value {
        json!({
            "title": title,
            "description": "Phát triển hệ thống backend",
            "requirements": ["Rust", "PostgreSQL"],
            "salary_min": 20000000,
            "salary_max": 40000000,
            "location": "Hà Nội",
            "job_type": "full-time",
            "experience_level": "senior"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let (app, _) = app();
        let id = register(&app, "a@x.com", "candidate").await;
        assert!(!id.is_empty());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/register",
            Some(json!({"email": "a@x.com", "name": "Other", "role": "employer"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Email already registered");

        let (status, body) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["role"], "candidate");
        assert!(body["created_at"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::GET, "/api/users/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_candidate_profile_lifecycle() {
        let (app, _) = app();
        let user_id = register(&app, "a@x.com", "candidate").await;
        let uri = format!("/api/candidates/{user_id}");

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"skills": ["Go"]}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, created) = send(&app, Method::POST, &uri, Some(json!({"skills": ["Go"]}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["user_id"], json!(user_id));
        assert_eq!(created["experience"], "");

        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["skills"], json!(["Go"]));

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let (status, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"skills": ["Go", "Rust"], "desired_position": "Backend Developer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], created["id"]);

        let (_, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(fetched["skills"], json!(["Go", "Rust"]));
        assert_eq!(fetched["desired_position"], "Backend Developer");
        let before: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(created["updated_at"].clone()).unwrap();
        let after: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(fetched["updated_at"].clone()).unwrap();
        assert!(after > before);

        let (status, _) = send(&app, Method::POST, &uri, Some(json!({"skills": ["Java"]}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profiles_for_unknown_user_are_404() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::POST, "/api/candidates/ghost", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/companies/ghost",
            Some(json!({"name": "X", "description": "", "industry": "", "size": "", "location": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::GET, "/api/companies/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_jobs_post_list_and_fetch() {
        let (app, store) = app();
        let company_id = company_for(&app).await;

        let (status, _) = send(&app, Method::POST, "/api/jobs/ghost", Some(job_body("X"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, first) = send(
            &app,
            Method::POST,
            &format!("/api/jobs/{company_id}"),
            Some(job_body("Senior Rust Engineer")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["is_active"], true);
        assert_eq!(first["job_type"], "full-time");
        let (_, second) = send(
            &app,
            Method::POST,
            &format!("/api/jobs/{company_id}"),
            Some(job_body("Data Engineer")),
        )
        .await;

        let (status, listed) = send(&app, Method::GET, "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 2);

        let (_, window) = send(&app, Method::GET, "/api/jobs?skip=1&limit=5", None).await;
        assert_eq!(window.as_array().unwrap().len(), 1);
        assert_eq!(window[0]["id"], second["id"]);

        // inactive jobs drop out of the listing but remain addressable
        let mut closed: Job = serde_json::from_value(first.clone()).unwrap();
        closed.id = "closed-job".to_string();
        closed.is_active = false;
        store
            .insert_one("jobs", to_document(&closed).unwrap())
            .await
            .unwrap();

        let (_, listed) = send(&app, Method::GET, "/api/jobs?limit=100", None).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|j| j["is_active"] == true));

        let (status, fetched) = send(&app, Method::GET, "/api/jobs/closed-job", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["is_active"], false);

        let (status, _) = send(&app, Method::GET, "/api/jobs/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unlisted_job_type_and_level_stored_as_given() {
        let (app, _) = app();
        let company_id = company_for(&app).await;
        let mut body = job_body("X");
        body["job_type"] = json!("freelance");
        body["experience_level"] = json!("lead");
        let (status, created) =
            send(&app, Method::POST, &format!("/api/jobs/{company_id}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["job_type"], "freelance");
        assert_eq!(created["experience_level"], "lead");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/api/jobs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["job_type"], "freelance");
        assert_eq!(fetched["experience_level"], "lead");
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let (app, _) = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/register",
            Some(json!({"email": "x@x.com", "name": "X", "role": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    fn multipart_request(uri: &str, field: &str, filename: &str, contents: &str) -> Request<Body> {
        let boundary = "careerbridge-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             {contents}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_cv_upload_stores_base64() {
        let (app, _) = app();
        let user_id = register(&app, "a@x.com", "candidate").await;
        let uri = format!("/api/candidates/{user_id}");
        send(&app, Method::POST, &uri, Some(json!({"skills": ["Go"]}))).await;

        let response = app
            .clone()
            .oneshot(multipart_request(
                &format!("/api/upload-cv/{user_id}"),
                "file",
                "cv_nguyen_van_a.pdf",
                "%PDF-1.7 second",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&to_bytes(response.into_body(), 1024).await.unwrap()).unwrap();
        assert_eq!(body["message"], "CV uploaded successfully");
        assert_eq!(body["filename"], "cv_nguyen_van_a.pdf");

        let (_, profile) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(profile["cv_file"], "JVBERi0xLjcgc2Vjb25k");
        assert_eq!(profile["skills"], json!(["Go"]));
    }

    #[tokio::test]
    async fn test_cv_upload_errors() {
        let (app, _) = app();
        let response = app
            .clone()
            .oneshot(multipart_request("/api/upload-cv/ghost", "file", "cv.pdf", "x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(multipart_request("/api/upload-cv/ghost", "resume", "cv.pdf", "x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ai_routes() {
        let (app, _) = app_with(Arc::new(ScriptedChat::replying(
            r#"{"courses": [{"title": "Rust", "provider": "Udemy", "duration": "1 tháng",
                "skill_focus": "Rust", "career_impact": "Cao", "priority": "low"}]}"#,
        )));
        let user_id = register(&app, "a@x.com", "candidate").await;

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/ai/course-recommendations/{user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, Method::POST, &format!("/api/candidates/{user_id}"), Some(json!({"skills": ["Rust"]}))).await;
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/ai/course-recommendations/{user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courses"][0]["priority"], "low");

        // a course reply is not a job recommendation
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/ai/job-recommendations/{user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "RECOMMENDATION_PARSE_ERROR");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/ai/candidate-recommendations/c1?job_id=ghost",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ai_upstream_failure_is_500_with_message() {
        let (app, _) = app();
        let user_id = register(&app, "a@x.com", "candidate").await;
        send(&app, Method::POST, &format!("/api/candidates/{user_id}"), Some(json!({}))).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/ai/job-recommendations/{user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["message"],
            "AI recommendation failed: API error (status 503): upstream unavailable"
        );
    }

    #[test]
    fn test_cors_layer_builds_for_both_modes() {
        let _ = cors_layer(&CorsOrigins::Any);
        let _ = cors_layer(&CorsOrigins::List(vec![
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]));
    }
}
