//! Request Body and Query Binding
//!
//! Handlers accept either `application/json` or
//! `application/x-www-form-urlencoded` bodies. Binding failures become
//! `400` envelopes instead of the framework's plain-text rejections.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::{HeaderValue, header, request::Parts};
use axum_extra::extract::{Form, Query};
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;

/// Message used for every body/query binding failure
pub const INVALID_REQUEST_DATA: &str = "Invalid request data";

/// Body extractor selecting JSON or form decoding by `Content-Type`
///
/// A missing `Content-Type` is decoded as a form, matching plain HTML posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") || content_type.contains("+json") {
            let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
                let hint = e.body_text();
                AppError::bad_request(INVALID_REQUEST_DATA)
                    .with_action(hint)
                    .with_source(e)
            })?;
            return Ok(Self(value));
        }

        if content_type.is_empty() {
            req.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }

        if content_type.is_empty() || content_type.starts_with("application/x-www-form-urlencoded")
        {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                let hint = e.body_text();
                AppError::bad_request(INVALID_REQUEST_DATA)
                    .with_action(hint)
                    .with_source(e)
            })?;
            return Ok(Self(value));
        }

        Err(AppError::bad_request(INVALID_REQUEST_DATA)
            .with_action("Send application/json or application/x-www-form-urlencoded"))
    }
}

/// Query-string extractor supporting repeated keys (`?tag=a&tag=b`)
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                let hint = e.body_text();
                AppError::bad_request(INVALID_REQUEST_DATA)
                    .with_action(hint)
                    .with_source(e)
            })?;
        Ok(Self(value))
    }
}
