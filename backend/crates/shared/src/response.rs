//! Response envelope
//!
//! Every endpoint answers with a JSON object that carries a `message`.
//! Success bodies wrap their payload in `data` (or use a dedicated DTO with
//! named fields); failures are always `{message, data}` with `data` being a
//! hint string or `null`.

use std::borrow::Cow;

use serde::Serialize;

/// Failure envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub data: Option<String>,
}

/// Success envelope: `{ "message": ..., "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub message: Cow<'static, str>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_message("success", data)
    }

    pub fn with_message(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Bodies that only confirm an action
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: Cow<'static, str>,
}

impl MessageResponse {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for MessageResponse {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(body["message"], "success");
        assert_eq!(body["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_error_shape_null_data() {
        let body = serde_json::to_value(ErrorBody {
            message: "Tool not found".into(),
            data: None,
        })
        .unwrap();
        assert!(body["data"].is_null());
    }
}
