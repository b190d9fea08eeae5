//! Bearer-token identity collaborator.
//!
//! Token issuance belongs to the external identity service; this module
//! only verifies tokens and extracts the caller id. Role and promoter
//! verification status are read from the users table per request, never
//! trusted from the token.

use crate::error::AppError;
use crate::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims shared with the identity service
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

/// Encoding/decoding keys derived from the shared secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for a caller id. Used by tests and local tooling;
    /// production tokens come from the identity service.
    pub fn issue(&self, user_id: Uuid, ttl_hours: i64) -> Result<String, AppError> {
        let exp = Utc::now()
            .checked_add_signed(chrono::Duration::hours(ttl_hours))
            .ok_or_else(|| AppError::Message("token expiry overflow".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: user_id,
            exp: exp as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Message(format!("token encoding failed: {}", e)))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }
}

/// Authenticated caller identity extracted from the Authorization header
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))?;

        let claims = state.jwt.verify(token)?;
        Ok(AuthUser { id: claims.sub })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let keys = JwtKeys::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, 1).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let keys = JwtKeys::new("test-secret");
        let other = JwtKeys::new("other-secret");
        let token = keys.issue(Uuid::new_v4(), 1).unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = JwtKeys::new("test-secret");
        let token = keys.issue(Uuid::new_v4(), -1).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let keys = JwtKeys::new("test-secret");
        assert!(keys.verify("not-a-jwt").is_err());
    }
}
