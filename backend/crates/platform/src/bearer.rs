//! Bearer Token Header Handling
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};

/// Authentication scheme accepted in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Why a bearer token could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header is missing")]
    Missing,
    #[error("Authorization header must use the Bearer scheme")]
    InvalidScheme,
}

/// Extract the bearer token from headers
///
/// The scheme is matched case-insensitively; surrounding whitespace is ignored.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?
        .trim();

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::InvalidScheme);
    }

    // `value` is trimmed, so a present separator always leaves a non-empty token
    Ok(token.trim())
}

/// Like [`extract_bearer`] but absent or malformed headers are `None`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    extract_bearer(headers).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));

        let headers = headers_with("bearer   xyz ");
        assert_eq!(extract_bearer(&headers), Ok("xyz"));
    }

    #[test]
    fn test_extract_bearer_errors() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
        assert_eq!(
            extract_bearer(&headers_with("Basic dXNlcjpwYXNz")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer(&headers_with("Bearer")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(extract_bearer(&headers_with("Bearer  ")), Err(BearerError::InvalidScheme));
    }

    #[test]
    fn test_bearer_token_optional() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with("Bearer t")), Some("t"));
    }
}
