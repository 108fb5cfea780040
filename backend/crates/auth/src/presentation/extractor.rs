//! Auth Extractors
//!
//! Resolve the caller from the `Authorization: Bearer` header. Any state
//! that can hand out an `Arc<TokenIssuer>` through `FromRef` can use them.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use platform::bearer::{BearerError, extract_bearer};

use crate::application::token::TokenIssuer;
use crate::domain::entity::current_user::CurrentUser;
use crate::error::AuthError;

/// Verify the bearer token carried by `headers`
pub(crate) fn verify_bearer(
    headers: &HeaderMap,
    tokens: &TokenIssuer,
) -> Result<CurrentUser, AuthError> {
    let token = extract_bearer(headers).map_err(|e| match e {
        BearerError::Missing => AuthError::MissingToken,
        BearerError::InvalidScheme => AuthError::InvalidToken,
    })?;

    tokens.verify(token)
}

fn resolve(parts: &Parts, tokens: &TokenIssuer) -> Result<CurrentUser, AuthError> {
    // Already verified by `require_auth`
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(user.clone());
    }

    verify_bearer(&parts.headers, tokens)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<TokenIssuer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenIssuer>::from_ref(state);
        resolve(parts, &tokens)
    }
}

/// Caller if a valid token was presented; anonymous otherwise
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    Arc<TokenIssuer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenIssuer>::from_ref(state);
        Ok(MaybeUser(resolve(parts, &tokens).ok()))
    }
}
