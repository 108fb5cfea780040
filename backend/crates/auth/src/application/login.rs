//! Login Use Case
//!
//! Authenticates a user by user name or e-mail.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<User> {
        let identifier = input.identifier.trim();

        // Malformed identifiers cannot match an account
        let user = if Email::looks_like_email(identifier) {
            match Email::new(identifier) {
                Ok(email) => self.user_repo.find_by_email(&email).await?,
                Err(_) => None,
            }
        } else {
            match UserName::new(identifier) {
                Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await?,
                Err(_) => None,
            }
        };

        let user = user.ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(user)
    }
}
