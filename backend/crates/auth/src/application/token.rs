//! Session Token
//!
//! Issues and verifies HS256 JWTs. Built once at startup from [`AuthConfig`]
//! and shared through `Arc`.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind, get_current_timestamp,
};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::{current_user::CurrentUser, user::User};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub iat: u64,
    pub exp: u64,
}

/// Issued token with its expiry (unix seconds)
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        let iat = get_current_timestamp();
        let claims = Claims {
            user_id: user.user_id.into_uuid(),
            username: user.user_name.as_str().to_owned(),
            role: user.user_role,
            iat,
            exp: iat + self.ttl_secs,
        };

        self.sign(&claims)
    }

    /// Sign arbitrary claims
    pub fn sign(&self, claims: &Claims) -> AuthResult<IssuedToken> {
        let token = encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    pub fn verify(&self, token: &str) -> AuthResult<CurrentUser> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        Ok(CurrentUser {
            user_id: UserId::from_uuid(claims.user_id),
            user_name: claims.username,
            user_role: claims.role,
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };

    fn user() -> User {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        User::new(
            UserName::new("user1").unwrap(),
            Email::new("user1@example.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(&AuthConfig::default());
        let user = user();

        let issued = issuer.issue(&user).unwrap();
        let current = issuer.verify(&issued.token).unwrap();

        assert_eq!(current.user_id, user.user_id);
        assert_eq!(current.user_name, "user1");
        assert_eq!(current.user_role, UserRole::User);
        assert!(issued.expires_at > get_current_timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = TokenIssuer::new(&AuthConfig::default())
            .issue(&user())
            .unwrap();
        let other = TokenIssuer::new(&AuthConfig::with_random_secret());

        assert!(matches!(
            other.verify(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let issuer = TokenIssuer::new(&AuthConfig::default());
        let now = get_current_timestamp();
        let issued = issuer
            .sign(&Claims {
                user_id: Uuid::new_v4(),
                username: "user1".to_string(),
                role: UserRole::User,
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert!(matches!(
            issuer.verify(&issued.token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        let issuer = TokenIssuer::new(&AuthConfig::default());
        assert!(matches!(
            issuer.verify("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
