//! Forgot Password Use Case
//!
//! Resets the password of the account owning an e-mail address.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Forgot password input
pub struct ForgotPasswordInput {
    pub email: String,
    pub new_password: String,
    pub reset_code: String,
}

/// Forgot password use case
pub struct ForgotPasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ForgotPasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: ForgotPasswordInput) -> AuthResult<()> {
        if !self.config.accepts_verification_code(&input.reset_code) {
            return Err(AuthError::InvalidCode("reset code"));
        }

        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.new_password)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.set_password(UserPassword::from_raw(&raw_password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset");

        Ok(())
    }
}
