//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::{audit_status::AuditStatus, resource_kind::ResourceKind};

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing, or not visible to the caller
    #[error("{} not found", .0.label())]
    ResourceNotFound(ResourceKind),

    /// Review target whose family is not known from the request
    #[error("Item not found")]
    ItemNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Material not found")]
    MaterialNotFound,

    #[error("User not found")]
    UserNotFound,

    /// Caller does not own the resource
    #[error("Only the owner can modify this {}", .0.code())]
    NotOwner(ResourceKind),

    /// Caller is neither the comment author nor an admin
    #[error("Only the author can delete this comment")]
    NotCommentAuthor,

    #[error("Cannot reply to a reply")]
    NestedReply,

    /// Status change not allowed from the current status
    #[error("Cannot {action} a submission that is {from}")]
    InvalidTransition {
        from: AuditStatus,
        action: &'static str,
    },

    /// Malformed or missing request fields
    #[error("{message}")]
    InvalidInput {
        message: String,
        action: Option<String>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CatalogError::InvalidInput {
            message: message.into(),
            action: None,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::ResourceNotFound(_)
            | CatalogError::ItemNotFound
            | CatalogError::CommentNotFound
            | CatalogError::MaterialNotFound
            | CatalogError::UserNotFound => StatusCode::NOT_FOUND,
            CatalogError::NotOwner(_) | CatalogError::NotCommentAuthor => StatusCode::FORBIDDEN,
            CatalogError::NestedReply
            | CatalogError::InvalidTransition { .. }
            | CatalogError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ResourceNotFound(_)
            | CatalogError::ItemNotFound
            | CatalogError::CommentNotFound
            | CatalogError::MaterialNotFound
            | CatalogError::UserNotFound => ErrorKind::NotFound,
            CatalogError::NotOwner(_) | CatalogError::NotCommentAuthor => ErrorKind::Forbidden,
            CatalogError::NestedReply
            | CatalogError::InvalidTransition { .. }
            | CatalogError::InvalidInput { .. } => ErrorKind::BadRequest,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            CatalogError::InvalidInput {
                action: Some(action),
                ..
            } => err.with_action(action.clone()),
            CatalogError::NestedReply => err.with_action("Reply to the top-level comment instead"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::NotOwner(_) | CatalogError::NotCommentAuthor => {
                tracing::warn!(error = %self, "Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Client errors keep their message and hint; anything else is internal
impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            CatalogError::InvalidInput {
                message: err.message().to_owned(),
                action: err.action().map(str::to_owned),
            }
        } else {
            CatalogError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::ResourceNotFound(ResourceKind::Course).to_string(),
            "Course not found"
        );
        assert_eq!(
            CatalogError::InvalidTransition {
                from: AuditStatus::Approved,
                action: "review",
            }
            .to_string(),
            "Cannot review a submission that is approved"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CatalogError::NotOwner(ResourceKind::Project).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(CatalogError::NestedReply.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(CatalogError::CommentNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(CatalogError::ItemNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            CatalogError::Internal("x".into()).to_app_error().public_message(),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_from_app_error() {
        let err: CatalogError = AppError::bad_request("Invalid id: abc").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid id: abc");
    }
}
