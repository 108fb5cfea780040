//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// `/auth` routes: registration, login, password reset
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/forgot-password", post(handlers::forgot_password::<R>))
        .with_state(state)
}

/// `/users` account routes; every route requires a bearer token
///
/// Profile writes are served on POST under their published paths
/// (`new_passward` included) and on PUT as well.
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/logout", post(handlers::logout))
        .route("/profile", get(handlers::get_profile::<R>))
        .route(
            "/update",
            post(handlers::update_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route(
            "/profile/new_email",
            post(handlers::update_email::<R>).put(handlers::update_email::<R>),
        )
        .route(
            "/profile/new_passward",
            post(handlers::update_password::<R>).put(handlers::update_password::<R>),
        )
        .route(
            "/profile/new_password",
            post(handlers::update_password::<R>).put(handlers::update_password::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            crate::presentation::middleware::require_auth,
        ))
        .with_state(state)
}
