//! Results Router

use auth::{TokenGuard, require_admin_token};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ResultsConfig;
use crate::domain::repository::{DocumentRenderer, DocumentStore, ResultRepository};
use crate::infra::fs_store::FsDocumentStore;
use crate::infra::postgres::PgResultRepository;
use crate::presentation::handlers::{self, ResultsAppState};

/// Create the Results router with the PostgreSQL Result Store and
/// filesystem document storage
pub fn results_router<D>(
    repo: PgResultRepository,
    renderer: D,
    config: ResultsConfig,
    guard: TokenGuard,
) -> Router
where
    D: DocumentRenderer + Send + Sync + 'static,
{
    let store = FsDocumentStore::new(config.documents_dir.clone());
    results_router_generic(repo, renderer, store, config, guard)
}

/// Create a generic Results router
///
/// Only `/submit-result` sits behind the Token Guard; lookups and
/// downloads are public.
pub fn results_router_generic<R, D, S>(
    repo: R,
    renderer: D,
    store: S,
    config: ResultsConfig,
    guard: TokenGuard,
) -> Router
where
    R: ResultRepository + Send + Sync + 'static,
    D: DocumentRenderer + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let state = ResultsAppState {
        repo: Arc::new(repo),
        renderer: Arc::new(renderer),
        store: Arc::new(store),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/submit-result", post(handlers::submit_result::<R, D, S>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin_token));

    Router::new()
        .route("/student/{id}/result", get(handlers::view_result::<R, D, S>))
        .route("/download-pdf/{id}", get(handlers::download_pdf::<R, D, S>))
        .route("/find-student", post(handlers::find_student::<R, D, S>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryResultRepository;
    use crate::testing::FakeRenderer;
    use auth::AuthConfig;
    use auth::domain::SessionClaims;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::Utc;
    use kernel::id::AdminId;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        token: String,
        _dir: tempfile::TempDir,
    }

    fn app() -> TestApp {
        let auth_config = Arc::new(AuthConfig::with_random_secret());
        let claims = SessionClaims::issue(AdminId::new(), Utc::now(), auth_config.token_ttl);
        let token = platform::token::encode(&claims, &auth_config.token_secret).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let config = ResultsConfig {
            documents_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let router = results_router_generic(
            InMemoryResultRepository::new(),
            FakeRenderer::default(),
            FsDocumentStore::new(dir.path()),
            config,
            TokenGuard::new(auth_config),
        );

        TestApp {
            router,
            token,
            _dir: dir,
        }
    }

    fn submission_body() -> serde_json::Value {
        serde_json::json!({
            "studentName": "Asha Verma",
            "rollNo": "cs21b001",
            "semester": "3",
            "photo": "https://cdn.example.edu/asha.jpg",
            "subjects": [
                {"code": "CS301", "name": "Operating Systems", "internalMarks": 42, "externalMarks": "38"},
                {"code": "CS302", "name": "Databases", "internalMarks": 45, "externalMarks": 47}
            ]
        })
    }

    fn post_json(uri: &str, body: serde_json::Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn submit(app: &TestApp) -> serde_json::Value {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/submit-result", submission_body(), Some(&app.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_submit_returns_id_and_hash() {
        let app = app();
        let body = submit(&app).await;

        assert_eq!(
            body["message"],
            "Result saved and PDF + hash generated successfully"
        );
        let hash = body["hash"].as_str().unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert!(body["studentId"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    }

    #[tokio::test]
    async fn test_submit_twice_is_conflict() {
        let app = app();
        submit(&app).await;

        let response = app
            .router
            .clone()
            .oneshot(post_json("/submit-result", submission_body(), Some(&app.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            json_body(response).await["detail"],
            "Result already exists for this student and semester."
        );
    }

    #[tokio::test]
    async fn test_submit_requires_token() {
        let app = app();

        let response = app
            .router
            .clone()
            .oneshot(post_json("/submit-result", submission_body(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .router
            .clone()
            .oneshot(post_json("/submit-result", submission_body(), Some("a.b.c")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_submit_validation_lists_fields() {
        let app = app();
        let mut body = submission_body();
        body["semester"] = serde_json::json!(9);
        body["subjects"][0]["internalMarks"] = serde_json::json!(51);

        let response = app
            .router
            .clone()
            .oneshot(post_json("/submit-result", body, Some(&app.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = json_body(response).await.to_string();
        assert!(text.contains("semester"));
        assert!(text.contains("subjects[0].internalMarks"));
    }

    #[tokio::test]
    async fn test_mistyped_fields_are_bad_request() {
        let app = app();
        for (field, value) in [
            ("semester", serde_json::json!(true)),
            ("studentName", serde_json::json!(5)),
        ] {
            let mut body = submission_body();
            body[field] = value;

            let response = app
                .router
                .clone()
                .oneshot(post_json("/submit-result", body, Some(&app.token)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json"
            );
            let problem = json_body(response).await;
            assert_eq!(problem["status"], 400);
            assert_eq!(problem["errors"][0]["field"], field);
            assert!(!problem.to_string().contains("NumberOrString"));
        }

        let mut body = submission_body();
        body["subjects"][1]["externalMarks"] = serde_json::json!({"value": 47});
        let response = app
            .router
            .clone()
            .oneshot(post_json("/submit-result", body, Some(&app.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["errors"][0]["field"],
            "subjects[1].externalMarks"
        );
    }

    #[tokio::test]
    async fn test_find_student_rejects_mistyped_body() {
        let response = app()
            .router
            .oneshot(post_json(
                "/find-student",
                serde_json::json!({"studentName": ["Asha"], "rollNo": "CS21B001"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["errors"][0]["field"], "studentName");
    }

    #[tokio::test]
    async fn test_find_student_is_case_insensitive() {
        let app = app();
        let submitted = submit(&app).await;

        let response = app
            .router
            .clone()
            .oneshot(post_json(
                "/find-student",
                serde_json::json!({"studentName": "asha", "rollNo": "CS21B001"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["studentId"], submitted["studentId"]);

        let response = app
            .router
            .clone()
            .oneshot(post_json(
                "/find-student",
                serde_json::json!({"studentName": "Ravi", "rollNo": "CS21B001"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_view_result_shows_hash() {
        let app = app();
        let submitted = submit(&app).await;
        let id = submitted["studentId"].as_str().unwrap();

        let response = app
            .router
            .clone()
            .oneshot(get(&format!("/student/{id}/result")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("Asha Verma"));
        assert!(html.contains(submitted["hash"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_download_matches_hash() {
        let app = app();
        let submitted = submit(&app).await;
        let id = submitted["studentId"].as_str().unwrap();

        let response = app
            .router
            .clone()
            .oneshot(get(&format!("/download-pdf/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"result-{id}.pdf\"").as_str()
        );

        let document = body_bytes(response).await;
        assert_eq!(platform::crypto::sha256_hex(&document), submitted["hash"]);
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_id_is_not_found() {
        let app = app();
        for uri in [
            format!("/student/{}/result", uuid::Uuid::new_v4()),
            "/student/not-an-id/result".to_string(),
            format!("/download-pdf/{}", uuid::Uuid::new_v4()),
            "/download-pdf/42".to_string(),
        ] {
            let response = app.router.clone().oneshot(get(&uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
