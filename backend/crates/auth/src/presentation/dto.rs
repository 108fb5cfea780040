//! API DTOs (Data Transfer Objects)
//!
//! Field names follow the public wire format, including its historical
//! spellings (`avater`, `new_passward`), which are accepted as aliases.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::{ProfilePatch, User};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// E-mail verification code
    #[serde(alias = "emailCode")]
    pub email_password: String,
    /// Invite code
    #[serde(alias = "inviteCode")]
    pub certify_password: String,
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub message: Cow<'static, str>,
    pub token: String,
    /// Unix seconds
    pub expires_at: u64,
    pub user: UserView,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User name or email
    #[serde(alias = "usernameOrEmail", alias = "username", alias = "identifier")]
    pub username_or_email: String,
    pub password: String,
}

// ============================================================================
// Forgot Password
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
    #[serde(alias = "newPassword")]
    pub new_password: String,
    /// Reset code
    #[serde(alias = "code")]
    pub certify_password: String,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile update; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub nickname: Option<String>,
    #[serde(alias = "avatar")]
    pub avater: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "facePhoto")]
    pub face_photo: Option<String>,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            nickname: req.nickname,
            avatar: req.avater,
            description: req.description,
            face_photo: req.face_photo,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmailRequest {
    /// Current user name; informational, the token identifies the account
    #[serde(default)]
    pub name: Option<String>,
    pub password: String,
    #[serde(alias = "newEmail")]
    pub new_email: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(alias = "new_passward", alias = "newPassword")]
    pub new_password: String,
    pub code: String,
}

// ============================================================================
// User View
// ============================================================================

/// Public representation of a user; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub avater: String,
    pub description: String,
    pub face_photo: String,
    pub role: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            username: user.user_name.as_str().to_owned(),
            nickname: user.nickname.clone(),
            email: user.email.as_str().to_owned(),
            avater: user.avatar.clone(),
            description: user.description.clone(),
            face_photo: user.face_photo.clone(),
            role: user.user_role.code(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_accepts_wire_names() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "username": "user1",
            "email": "user1@example.com",
            "password": "secret123",
            "email_password": "123456",
            "certify_password": "INVITE"
        }))
        .unwrap();
        assert_eq!(req.email_password, "123456");
        assert_eq!(req.certify_password, "INVITE");
    }

    #[test]
    fn test_update_password_accepts_legacy_spelling() {
        let req: UpdatePasswordRequest = serde_json::from_value(serde_json::json!({
            "name": "user1",
            "email": "user1@example.com",
            "new_passward": "another123",
            "code": "1"
        }))
        .unwrap();
        assert_eq!(req.new_password, "another123");
    }

    #[test]
    fn test_profile_patch_from_request() {
        let req: UpdateProfileRequest =
            serde_json::from_value(serde_json::json!({ "avater": "a.png" })).unwrap();
        let patch = ProfilePatch::from(req);
        assert_eq!(patch.avatar.as_deref(), Some("a.png"));
        assert!(patch.nickname.is_none());
    }
}
