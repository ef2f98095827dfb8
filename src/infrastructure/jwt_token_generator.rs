use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    services::token_service::{Token, TokenService},
};

pub const DEFAULT_EXPIRATION_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // Subject (admin username)
    exp: i64,    // Expiration time
    iat: i64,    // Issued at
}

#[derive(Clone)]
pub struct JwtTokenGenerator {
    secret: String,
    expiration_hours: i64,
}

impl JwtTokenGenerator {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: DEFAULT_EXPIRATION_HOURS,
        }
    }

    pub fn with_expiration(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }
}

impl TokenService for JwtTokenGenerator {
    fn generate(&self, subject: &str) -> Result<Token, DomainError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to generate token");
            DomainError::AuthenticationFailed
        })
    }

    fn verify(&self, token: &str) -> Result<String, DomainError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims.sub)
        .map_err(|_| DomainError::AuthenticationFailed)
    }
}
