use crate::core::errors::WhoOwesError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub nbf: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    secret: String,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl JwtService {
    pub fn new(secret: String, issuer: String, audience: String, lifetime_minutes: i64) -> Self {
        JwtService {
            secret,
            issuer,
            audience,
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    /// Signs a token for the user; returns it with its expiry.
    pub fn generate_token(&self, user_id: &str, email: &str) -> Result<(String, DateTime<Utc>), WhoOwesError> {
        let now = Utc::now();
        let expires_at = now + self.lifetime;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| WhoOwesError::InternalServerError(format!("JWT encoding error: {}", e)))?;

        Ok((token, expires_at))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, WhoOwesError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_nbf = true;
        validation.leeway = 30;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| WhoOwesError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
