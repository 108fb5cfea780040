//! Auth Middleware
//!
//! Route layers that reject unauthenticated (401) or non-admin (403)
//! requests before the handler runs. The verified caller is stored in the
//! request extensions for the extractors.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token::TokenIssuer;
use crate::error::AuthError;
use crate::presentation::extractor::verify_bearer;

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = verify_bearer(req.headers(), &tokens)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that requires a valid bearer token with the admin role
pub async fn require_admin(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = verify_bearer(req.headers(), &tokens)?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.user_id, "Non-admin request to admin route");
        return Err(AuthError::AdminRequired);
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
