//! Bearer token claims

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims of an authenticated caller. Only `sub` is used, as the identity
/// echoed back in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// Claims for `sub` valid for `ttl` from now
    pub fn new(sub: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            exp: (now + ttl).timestamp(),
            iat: Some(now.timestamp()),
        }
    }

    /// Create a new HS256 token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and validate a token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let claims = Claims::new("bibliotecaria", Duration::hours(1));
        let token = claims.create_token("secret").unwrap();
        assert_eq!(Claims::from_token(&token, "secret").unwrap(), claims);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = Claims::new("x", Duration::hours(1)).create_token("secret").unwrap();
        assert!(Claims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = Claims::new("x", Duration::hours(-2)).create_token("secret").unwrap();
        assert!(Claims::from_token(&token, "secret").is_err());
    }
}
