//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Development signing secret, used only when `JWT_SECRET` is unset
pub const DEV_JWT_SECRET: &str = "campus-dev-secret-change-me";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Accepted invite codes; empty accepts any non-empty code
    pub invite_codes: Vec<String>,
    /// Fixed e-mail/reset code; `None` accepts any non-empty code
    pub verification_code: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.as_bytes().to_vec(),
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            password_pepper: None,
            invite_codes: Vec::new(),
            verification_code: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (tokens die with the process)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret.to_vec(),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }

    pub fn accepts_invite_code(&self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        self.invite_codes.is_empty() || self.invite_codes.iter().any(|c| c == code)
    }

    /// E-mail verification and password reset codes
    pub fn accepts_verification_code(&self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        match &self.verification_code {
            Some(expected) => expected == code,
            None => true,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("invite_codes", &self.invite_codes.len())
            .field("verification_code", &self.verification_code.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_open_by_default() {
        let config = AuthConfig::default();
        assert!(config.accepts_invite_code("anything"));
        assert!(config.accepts_verification_code("123456"));
        assert!(!config.accepts_invite_code("  "));
        assert!(!config.accepts_verification_code(""));
    }

    #[test]
    fn test_configured_codes() {
        let config = AuthConfig {
            invite_codes: vec!["SE2024".to_string(), "CAMPUS".to_string()],
            verification_code: Some("000000".to_string()),
            ..Default::default()
        };
        assert!(config.accepts_invite_code("CAMPUS"));
        assert!(!config.accepts_invite_code("other"));
        assert!(config.accepts_verification_code("000000"));
        assert!(!config.accepts_verification_code("123456"));
    }

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.len(), 32);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", AuthConfig::default());
        assert!(!output.contains(DEV_JWT_SECRET));
    }
}
