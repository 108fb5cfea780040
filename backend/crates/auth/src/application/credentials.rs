//! E-mail and Password Change Use Cases
//!
//! Both require a verification code; the e-mail change also re-checks the
//! current password.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Update email input
pub struct UpdateEmailInput {
    pub password: String,
    pub new_email: String,
    pub code: String,
}

/// Update email use case
pub struct UpdateEmailUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UpdateEmailUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateEmailInput) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !self.config.accepts_verification_code(&input.code) {
            return Err(AuthError::InvalidCode("email verification code"));
        }

        let new_email = Email::new(&input.new_email)?;
        if new_email == user.email {
            return Ok(user);
        }
        if self.user_repo.exists_by_email(&new_email).await? {
            return Err(AuthError::EmailTaken);
        }

        user.set_email(new_email);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Email updated");

        Ok(user)
    }
}

/// Update password input
pub struct UpdatePasswordInput {
    /// Must match the account's e-mail
    pub email: String,
    pub new_password: String,
    pub code: String,
}

/// Update password use case
pub struct UpdatePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UpdatePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdatePasswordInput) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let email_matches = Email::new(&input.email)
            .map(|email| email == user.email)
            .unwrap_or(false);
        if !email_matches {
            return Err(AuthError::InvalidCredentials);
        }

        if !self.config.accepts_verification_code(&input.code) {
            return Err(AuthError::InvalidCode("verification code"));
        }

        let raw_password = RawPassword::new(input.new_password)?;
        user.set_password(UserPassword::from_raw(&raw_password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password updated");

        Ok(())
    }
}
