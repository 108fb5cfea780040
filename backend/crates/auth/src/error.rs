//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User name already registered
    #[error("Username already exists")]
    UsernameTaken,

    /// Email already registered
    #[error("Email already exists")]
    EmailTaken,

    /// Email verification or invite code rejected
    #[error("Invalid {0}")]
    InvalidCode(&'static str),

    /// Unknown identifier or wrong password
    #[error("Invalid username/email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    /// No `Authorization: Bearer` header
    #[error("Missing authentication token")]
    MissingToken,

    /// Bad signature, malformed token, or unknown subject
    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Authentication token expired")]
    TokenExpired,

    #[error("Administrator privileges required")]
    AdminRequired,

    /// Input rejected by a value object
    #[error("{message}")]
    Validation {
        message: String,
        action: Option<String>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UsernameTaken
            | AuthError::EmailTaken
            | AuthError::InvalidCode(_)
            | AuthError::Validation { .. } => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UsernameTaken
            | AuthError::EmailTaken
            | AuthError::InvalidCode(_)
            | AuthError::Validation { .. } => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Duplicate user name or email; reported as 400 on the wire
    pub fn is_conflict(&self) -> bool {
        matches!(self, AuthError::UsernameTaken | AuthError::EmailTaken)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::Validation {
                action: Some(action),
                ..
            } => err.with_action(action.clone()),
            AuthError::MissingToken => {
                err.with_action("Send an Authorization: Bearer <token> header")
            }
            AuthError::TokenExpired => err.with_action("Please log in again"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::TokenExpired => {
                tracing::warn!(error = %self, "Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Client errors keep their message and hint; anything else is internal
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation {
                message: err.message().to_owned(),
                action: err.action().map(str::to_owned),
            }
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_is_bad_request() {
        assert_eq!(AuthError::UsernameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::BadRequest);
        assert!(AuthError::EmailTaken.is_conflict());
        assert!(!AuthError::InvalidCredentials.is_conflict());
    }

    #[test]
    fn test_validation_from_app_error() {
        let err: AuthError = AppError::bad_request("Invalid email format")
            .with_action("Please enter a valid email address")
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let app = err.to_app_error();
        assert_eq!(app.message(), "Invalid email format");
        assert_eq!(app.action(), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_server_app_error_becomes_internal() {
        let err: AuthError = AppError::internal("Password hashing failed").into();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.to_app_error().public_message(), "Internal Server Error");
    }

    #[test]
    fn test_token_errors_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::TokenExpired,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(AuthError::AdminRequired.status_code(), StatusCode::FORBIDDEN);
    }
}
