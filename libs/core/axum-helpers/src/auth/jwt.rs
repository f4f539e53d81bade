use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::config::JwtConfig;

/// Access token lifetime in seconds
pub const ACCESS_TOKEN_TTL: i64 = 900;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user id)
    pub sub: String,
    /// Display name, used to partition the rate limiter
    pub name: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl JwtClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Signs and verifies HS256 access tokens
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<Keys>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
        }
    }

    pub fn create_access_token(
        &self,
        user_id: &str,
        name: &str,
        roles: &[&str],
    ) -> Result<String, AuthError> {
        self.create_token(user_id, name, roles, Duration::seconds(ACCESS_TOKEN_TTL))
    }

    fn create_token(
        &self,
        user_id: &str,
        name: &str,
        roles: &[&str],
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys.encoding,
        )?)
    }

    /// Check signature and expiry, returning the claims
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(
            token,
            &self.keys.decoding,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(secret: &str) -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(secret).unwrap())
    }

    #[test]
    fn test_issued_token_verifies() {
        let auth = auth("catalog-test-secret-with-32-chars!!");
        let token = auth.create_access_token("42", "maria", &["User"]).unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "maria");
        assert!(claims.has_role("user"));
        assert!(!claims.has_role("Admin"));
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = auth("catalog-test-secret-with-32-chars!!");
        let verifier = auth("another-secret-that-is-32-chars-long");
        let token = issuer.create_access_token("42", "maria", &[]).unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = auth("catalog-test-secret-with-32-chars!!");
        let token = auth
            .create_token("42", "maria", &["User"], Duration::seconds(-3600))
            .unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let auth = auth("catalog-test-secret-with-32-chars!!");
        assert!(auth.verify_token("not.a.jwt").is_err());
    }
}
