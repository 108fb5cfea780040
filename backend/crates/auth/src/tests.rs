//! Service and router tests for the auth crate, driven by the in-memory
//! repository

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::{RegisterInput, RegisterUseCase};
    use crate::domain::entity::user::User;
    use crate::infra::memory::InMemoryUserRepository;

    pub fn repo_and_config() -> (Arc<InMemoryUserRepository>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(AuthConfig::default()),
        )
    }

    pub fn register_input(user_name: &str, email: &str) -> RegisterInput {
        RegisterInput {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            email_code: "123456".to_string(),
            invite_code: "INVITE".to_string(),
        }
    }

    pub async fn register(
        repo: &Arc<InMemoryUserRepository>,
        config: &Arc<AuthConfig>,
        user_name: &str,
        email: &str,
    ) -> User {
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input(user_name, email))
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod register_tests {
    use std::sync::Arc;

    use super::fixtures::*;
    use crate::application::config::AuthConfig;
    use crate::application::RegisterUseCase;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_register_creates_user() {
        let (repo, config) = repo_and_config();
        let user = register(&repo, &config, "user1", "user1@example.com").await;

        assert_eq!(user.user_name.as_str(), "user1");
        assert_eq!(user.nickname, "user1");
        assert_eq!(user.user_role, UserRole::User);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        let err = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("user1", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        let err = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("user2", "USER1@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_username_checked_before_email() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        let err = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("user1", "user1@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_invalid_invite_code() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig {
            invite_codes: vec!["SE2024".to_string()],
            ..Default::default()
        });

        let err = RegisterUseCase::new(repo, config)
            .execute(register_input("user1", "user1@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode("invite code")));
    }

    #[tokio::test]
    async fn test_empty_email_code_rejected() {
        let (repo, config) = repo_and_config();
        let mut input = register_input("user1", "user1@example.com");
        input.email_code = String::new();

        let err = RegisterUseCase::new(repo, config)
            .execute(input)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode(_)));
    }

    #[tokio::test]
    async fn test_invalid_username_is_validation_error() {
        let (repo, config) = repo_and_config();
        let err = RegisterUseCase::new(repo, config)
            .execute(register_input("a!", "user1@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation { .. }));
    }
}

#[cfg(test)]
mod login_tests {
    use super::fixtures::*;
    use crate::application::{LoginInput, LoginUseCase};
    use crate::error::AuthError;

    fn input(identifier: &str, password: &str) -> LoginInput {
        LoginInput {
            identifier: identifier.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        let err = LoginUseCase::new(repo, config)
            .execute(input("user1", "wrongpass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_by_email() {
        let (repo, config) = repo_and_config();
        let registered = register(&repo, &config, "user1", "user1@example.com").await;

        let user = LoginUseCase::new(repo, config)
            .execute(input("user1@example.com", "secret123"))
            .await
            .unwrap();
        assert_eq!(user.user_id, registered.user_id);
    }

    #[tokio::test]
    async fn test_login_by_username() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        let user = LoginUseCase::new(repo, config)
            .execute(input("user1", "secret123"))
            .await
            .unwrap();
        assert_eq!(user.user_name.as_str(), "user1");
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (repo, config) = repo_and_config();
        let err = LoginUseCase::new(repo, config)
            .execute(input("nobody", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}

#[cfg(test)]
mod account_tests {
    use std::sync::Arc;

    use super::fixtures::*;
    use crate::application::config::AuthConfig;
    use crate::application::{
        ForgotPasswordInput, ForgotPasswordUseCase, GetProfileUseCase, LoginInput, LoginUseCase,
        UpdateEmailInput, UpdateEmailUseCase, UpdatePasswordInput, UpdatePasswordUseCase,
        UpdateProfileUseCase,
    };
    use crate::domain::entity::user::ProfilePatch;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_update_profile_nickname_only() {
        let (repo, config) = repo_and_config();
        let user = register(&repo, &config, "user1", "user1@example.com").await;
        let before = GetProfileUseCase::new(repo.clone())
            .execute(&user.user_id)
            .await
            .unwrap();

        UpdateProfileUseCase::new(repo.clone())
            .execute(
                &user.user_id,
                ProfilePatch {
                    nickname: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let after = GetProfileUseCase::new(repo.clone())
            .execute(&user.user_id)
            .await
            .unwrap();
        assert_eq!(after.nickname, "X");
        assert_eq!(after.user_name, before.user_name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.avatar, before.avatar);
        assert_eq!(after.description, before.description);
        assert_eq!(after.face_photo, before.face_photo);
        assert_eq!(after.user_role, before.user_role);
    }

    #[tokio::test]
    async fn test_get_profile_unknown_user() {
        let (repo, _) = repo_and_config();
        let err = GetProfileUseCase::new(repo)
            .execute(&kernel::id::UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_forgot_password_then_login() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        ForgotPasswordUseCase::new(repo.clone(), config.clone())
            .execute(ForgotPasswordInput {
                email: "user1@example.com".to_string(),
                new_password: "brandnew99".to_string(),
                reset_code: "42".to_string(),
            })
            .await
            .unwrap();

        let login = LoginUseCase::new(repo, config);
        assert!(
            login
                .execute(LoginInput {
                    identifier: "user1".to_string(),
                    password: "brandnew99".to_string(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_forgot_password_wrong_reset_code() {
        let (repo, config) = repo_and_config();
        register(&repo, &config, "user1", "user1@example.com").await;

        let strict = Arc::new(AuthConfig {
            verification_code: Some("000000".to_string()),
            ..AuthConfig::default()
        });
        let err = ForgotPasswordUseCase::new(repo.clone(), strict)
            .execute(ForgotPasswordInput {
                email: "user1@example.com".to_string(),
                new_password: "brandnew99".to_string(),
                reset_code: "111111".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode("reset code")));

        let login = LoginUseCase::new(repo, config);
        assert!(
            login
                .execute(LoginInput {
                    identifier: "user1".to_string(),
                    password: "secret123".to_string(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email() {
        let (repo, config) = repo_and_config();
        let err = ForgotPasswordUseCase::new(repo, config)
            .execute(ForgotPasswordInput {
                email: "ghost@example.com".to_string(),
                new_password: "brandnew99".to_string(),
                reset_code: "42".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update_email_requires_password() {
        let (repo, config) = repo_and_config();
        let user = register(&repo, &config, "user1", "user1@example.com").await;

        let err = UpdateEmailUseCase::new(repo, config)
            .execute(
                &user.user_id,
                UpdateEmailInput {
                    password: "wrongpass".to_string(),
                    new_email: "new@example.com".to_string(),
                    code: "1".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_update_email_taken() {
        let (repo, config) = repo_and_config();
        let user = register(&repo, &config, "user1", "user1@example.com").await;
        register(&repo, &config, "user2", "user2@example.com").await;

        let err = UpdateEmailUseCase::new(repo, config)
            .execute(
                &user.user_id,
                UpdateEmailInput {
                    password: "secret123".to_string(),
                    new_email: "user2@example.com".to_string(),
                    code: "1".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_update_email_success() {
        let (repo, config) = repo_and_config();
        let user = register(&repo, &config, "user1", "user1@example.com").await;

        let updated = UpdateEmailUseCase::new(repo, config)
            .execute(
                &user.user_id,
                UpdateEmailInput {
                    password: "secret123".to_string(),
                    new_email: "New@Example.com".to_string(),
                    code: "1".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email.as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn test_update_password_email_mismatch() {
        let (repo, config) = repo_and_config();
        let user = register(&repo, &config, "user1", "user1@example.com").await;

        let err = UpdatePasswordUseCase::new(repo, config)
            .execute(
                &user.user_id,
                UpdatePasswordInput {
                    email: "other@example.com".to_string(),
                    new_password: "another123".to_string(),
                    code: "1".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenIssuer;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::handlers::AuthAppState;
    use crate::presentation::router::{auth_router, users_router};

    fn app() -> Router {
        app_with(AuthConfig::default())
    }

    fn app_with(config: AuthConfig) -> Router {
        let config = Arc::new(config);
        let tokens = Arc::new(TokenIssuer::new(&config));
        let state = AuthAppState::new(InMemoryUserRepository::new(), config, tokens);

        Router::new()
            .nest("/auth", auth_router(state.clone()))
            .nest("/users", users_router(state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_login_profile() {
        let app = app();

        let (status, body) = send(
            &app,
            post_json(
                "/auth/register",
                json!({
                    "username": "user1",
                    "email": "user1@example.com",
                    "password": "secret123",
                    "email_password": "123456",
                    "certify_password": "INVITE"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let (status, body) = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "username_or_email": "user1", "password": "secret123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Request::get("/users/profile")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "user1");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_form_encoded() {
        let app = app();
        let (status, body) = send(
            &app,
            Request::post("/auth/register")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "username=user2&email=user2%40example.com&password=secret123&email_password=1&certify_password=2",
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["nickname"], "user2");
    }

    #[tokio::test]
    async fn test_duplicate_register_is_bad_request() {
        let app = app();
        let payload = json!({
            "username": "user1",
            "email": "user1@example.com",
            "password": "secret123",
            "email_password": "1",
            "certify_password": "1"
        });

        let (status, _) = send(&app, post_json("/auth/register", payload.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, post_json("/auth/register", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Username already exists");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json("/auth/login", json!({ "username_or_email": "user1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_password_unauthorized() {
        let app = app();
        let (status, _) = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "username_or_email": "ghost", "password": "secret123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_without_token() {
        let app = app();
        let (status, body) = send(
            &app,
            Request::get("/users/profile").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing authentication token");
    }

    async fn register_token(app: &Router, code: &str) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/auth/register",
                json!({
                    "username": "user1",
                    "email": "user1@example.com",
                    "password": "secret123",
                    "email_password": code,
                    "certify_password": "INVITE"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_forgot_password_wrong_code_is_bad_request() {
        let app = app_with(AuthConfig {
            verification_code: Some("000000".to_string()),
            ..AuthConfig::default()
        });
        register_token(&app, "000000").await;

        let (status, body) = send(
            &app,
            post_json(
                "/auth/forgot-password",
                json!({
                    "email": "user1@example.com",
                    "new_password": "brandnew99",
                    "certify_password": "111111"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid reset code");

        let (status, _) = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "username_or_email": "user1", "password": "secret123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_profile_writes_accept_post() {
        let app = app();
        let token = register_token(&app, "123456").await;

        let (status, body) = send(
            &app,
            Request::post("/users/update")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "nickname": "Neo" }).to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["nickname"], "Neo");

        let (status, _) = send(
            &app,
            Request::post("/users/profile/new_passward")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "email": "user1@example.com",
                        "new_passward": "brandnew99",
                        "code": "123456"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "username_or_email": "user1", "password": "brandnew99" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            post_json("/users/update", json!({ "nickname": "Trinity" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing authentication token");
    }
}
