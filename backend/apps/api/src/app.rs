//! Router assembly
//!
//! Mounts the auth and catalog routers on one tree and wraps it in the
//! HTTP layers shared by every route.

use std::sync::Arc;

use auth::handlers::AuthAppState;
use auth::{AuthConfig, TokenIssuer, UserRepository, auth_router, users_router};
use axum::{
    Router,
    http::{self, Method, StatusCode, header},
    routing::get,
};
use catalog::{
    CatalogAppState, CatalogRepository, admin_router, courses_router, library_router,
    projects_router, tools_router,
};
use kernel::response::MessageResponse;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Full application router over the given stores
pub fn build_router<U, C>(users: U, catalog: C, config: &ServerConfig) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: CatalogRepository,
{
    let auth_config = Arc::new(config.auth.clone());
    let tokens = Arc::new(TokenIssuer::new(&auth_config));

    routes(users, catalog, auth_config, tokens)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config.frontend_origins))
}

fn routes<U, C>(
    users: U,
    catalog: C,
    auth_config: Arc<AuthConfig>,
    tokens: Arc<TokenIssuer>,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: CatalogRepository,
{
    let auth_state = AuthAppState::new(users, auth_config, tokens.clone());
    let catalog_state = CatalogAppState::new(catalog, tokens);

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_router(auth_state.clone()))
        .nest(
            "/users",
            users_router(auth_state).merge(library_router(catalog_state.clone())),
        )
        .nest("/tools", tools_router(catalog_state.clone()))
        .nest("/courses", courses_router(catalog_state.clone()))
        .nest("/projects", projects_router(catalog_state.clone()))
        .nest("/admin", admin_router(catalog_state))
}

async fn health() -> MessageResponse {
    MessageResponse::new("ok")
}

fn cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use auth::{InMemoryUserRepository, UserRole};
    use axum::body::Body;
    use axum::http::Request;
    use catalog::InMemoryCatalogRepository;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    struct TestApp {
        router: Router,
        users: InMemoryUserRepository,
    }

    fn app() -> TestApp {
        let users = InMemoryUserRepository::new();
        let router = build_router(
            users.clone(),
            InMemoryCatalogRepository::new(users.clone()),
            &ServerConfig::default(),
        );
        TestApp { router, users }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn register(app: &Router, name: &str) -> String {
        let (status, body) = send(
            app,
            request(
                "POST",
                "/auth/register",
                None,
                Some(json!({
                    "username": name,
                    "email": format!("{name}@example.com"),
                    "password": "secret123",
                    "email_password": "123456",
                    "certify_password": "INVITE"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn promote(app: &TestApp, name: &str) -> String {
        let user_name = auth::models::user_name::UserName::new(name).unwrap();
        let mut user = app.users.find_by_user_name(&user_name).await.unwrap().unwrap();
        user.user_role = UserRole::Admin;
        app.users.update(&user).await.unwrap();

        let (status, body) = send(
            &app.router,
            request(
                "POST",
                "/auth/login",
                None,
                Some(json!({ "username": name, "password": "secret123" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app.router, request("GET", "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "ok");
    }

    #[tokio::test]
    async fn test_users_tree_serves_account_and_library() {
        let app = app();
        let token = register(&app.router, "alice").await;

        let (status, body) = send(&app.router, request("GET", "/users/profile", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "alice");

        let (status, body) = send(&app.router, request("GET", "/users/summit", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_course_lifecycle() {
        let app = app();
        let alice = register(&app.router, "alice").await;
        register(&app.router, "root").await;
        let admin = promote(&app, "root").await;

        let (status, body) = send(
            &app.router,
            request(
                "POST",
                "/courses/submit",
                Some(&alice),
                Some(json!({
                    "name": "Operating Systems",
                    "description": "processes and memory",
                    "teacher": ["Prof. Li"],
                    "category": "cs",
                    "semester": "2024-fall",
                    "credit": 4,
                    "tags": ["core"]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let course_id = body["data"]["resourceId"].as_str().unwrap().to_string();
        let item_id = body["data"]["itemId"].as_str().unwrap().to_string();

        // Pending courses are not listed
        let (_, body) = send(&app.router, request("GET", "/courses/profile", None, None)).await;
        assert_eq!(body["total"], 0);

        let (status, _) = send(
            &app.router,
            request("GET", "/admin/pending?type=course", Some(&alice), None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app.router,
            request(
                "POST",
                &format!("/admin/review/{item_id}"),
                Some(&admin),
                Some(json!({ "action": "approve" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        let (_, body) = send(
            &app.router,
            request("GET", "/courses/profile?semester=2024-fall", None, None),
        )
        .await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["credit"], 4);

        let (status, body) = send(
            &app.router,
            request(
                "POST",
                &format!("/courses/{course_id}/upload"),
                Some(&admin),
                Some(json!({
                    "description": "slides",
                    "resource": "https://example.com/os.pdf"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let textbook_id = body["data"]["textbookId"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app.router,
            request(
                "GET",
                &format!("/courses/{course_id}/textbooks/{textbook_id}/download"),
                None,
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app.router,
            request(
                "GET",
                &format!("/courses/{course_id}/textbooks/{textbook_id}/download"),
                Some(&alice),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["url"], "https://example.com/os.pdf");

        let (status, body) = send(
            &app.router,
            request("POST", &format!("/courses/{course_id}/view"), None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["views"], 1);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = app();
        let (status, _) = send(&app.router, request("GET", "/nowhere", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
