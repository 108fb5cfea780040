//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, State};
use kernel::response::{ApiResponse, MessageResponse};
use platform::extract::JsonOrForm;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    ForgotPasswordInput, ForgotPasswordUseCase, GetProfileUseCase, LoginInput, LoginUseCase,
    RegisterInput, RegisterUseCase, UpdateEmailInput, UpdateEmailUseCase, UpdatePasswordInput,
    UpdatePasswordUseCase, UpdateProfileUseCase,
};
use crate::domain::entity::{current_user::CurrentUser, user::User};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, TokenResponse, UpdateEmailRequest,
    UpdatePasswordRequest, UpdateProfileRequest, UserView,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: Arc<AuthConfig>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            repo: Arc::new(repo),
            config,
            tokens,
        }
    }
}

impl<R> FromRef<AuthAppState<R>> for Arc<TokenIssuer>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R>) -> Self {
        state.tokens.clone()
    }
}

fn token_response(
    tokens: &TokenIssuer,
    user: &User,
    message: &'static str,
) -> AuthResult<Json<TokenResponse>> {
    let issued = tokens.issue(user)?;

    Ok(Json(TokenResponse {
        message: message.into(),
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserView::from(user),
    }))
}

// ============================================================================
// Auth
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonOrForm(req): JsonOrForm<RegisterRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
            email_code: req.email_password,
            invite_code: req.certify_password,
        })
        .await?;

    token_response(&state.tokens, &user, "Registration successful")
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(LoginInput {
            identifier: req.username_or_email,
            password: req.password,
        })
        .await?;

    token_response(&state.tokens, &user, "Login successful")
}

/// POST /auth/forgot-password
pub async fn forgot_password<R>(
    State(state): State<AuthAppState<R>>,
    JsonOrForm(req): JsonOrForm<ForgotPasswordRequest>,
) -> AuthResult<MessageResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(ForgotPasswordInput {
            email: req.email,
            new_password: req.new_password,
            reset_code: req.certify_password,
        })
        .await?;

    Ok(MessageResponse::new("Password reset successful"))
}

// ============================================================================
// Account
// ============================================================================

/// POST /users/logout
///
/// Tokens are not stored server-side; the client discards its copy.
pub async fn logout(user: CurrentUser) -> MessageResponse {
    tracing::info!(user_id = %user.user_id, "User logged out");
    MessageResponse::new("Logout successful")
}

/// GET /users/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
) -> AuthResult<ApiResponse<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let profile = use_case.execute(&user.user_id).await?;

    Ok(ApiResponse::success(UserView::from(&profile)))
}

/// POST /users/update
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<UpdateProfileRequest>,
) -> AuthResult<ApiResponse<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone());
    let profile = use_case.execute(&user.user_id, req.into()).await?;

    Ok(ApiResponse::with_message(
        "Profile updated successfully",
        UserView::from(&profile),
    ))
}

/// POST /users/profile/new_email
pub async fn update_email<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<UpdateEmailRequest>,
) -> AuthResult<ApiResponse<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateEmailUseCase::new(state.repo.clone(), state.config.clone());
    let profile = use_case
        .execute(
            &user.user_id,
            UpdateEmailInput {
                password: req.password,
                new_email: req.new_email,
                code: req.code,
            },
        )
        .await?;

    Ok(ApiResponse::with_message(
        "Email updated successfully",
        UserView::from(&profile),
    ))
}

/// POST /users/profile/new_passward
pub async fn update_password<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<UpdatePasswordRequest>,
) -> AuthResult<MessageResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdatePasswordUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(
            &user.user_id,
            UpdatePasswordInput {
                email: req.email,
                new_password: req.new_password,
                code: req.code,
            },
        )
        .await?;

    Ok(MessageResponse::new("Password updated successfully"))
}
