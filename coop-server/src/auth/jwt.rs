//! JWT session tokens
//!
//! HS256 tokens carrying the member id, display name and role.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::roles;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Member id
    pub sub: String,
    pub name: String,
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp seconds)
    pub iat: i64,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Issue a session token for a member.
    pub fn issue(&self, user_id: &str, name: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Token part of an `Authorization: Bearer <token>` header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Authenticated caller, injected into request extensions by `require_auth`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl CurrentUser {
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        allowed.contains(&self.role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new("test-secret", 1);
        let token = service.issue("1001", "Ana", roles::CUSTOMER).unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "1001");
        assert_eq!(claims.role, roles::CUSTOMER);
        assert!(claims.exp > claims.iat);

        let user = CurrentUser::from(claims);
        assert_eq!(user.name, "Ana");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = JwtService::new("secret-a", 1)
            .issue("1001", "Ana", roles::CUSTOMER)
            .unwrap();
        let result = JwtService::new("secret-b", 1).validate(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token() {
        // well past the default 60s leeway
        let service = JwtService::new("test-secret", -2);
        let token = service.issue("1001", "Ana", roles::CUSTOMER).unwrap();
        assert!(matches!(
            service.validate(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }

    #[test]
    fn test_role_check() {
        let user = CurrentUser {
            id: "3001".into(),
            name: "Soporte".into(),
            role: roles::SUPPORT.into(),
        };
        assert!(user.has_any_role(roles::STAFF));
        assert!(!user.has_any_role(roles::NEWS_EDITORS));
    }
}
