use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::app_error::{AppError, AppResult};
use crate::application::use_cases::admin_auth::{AdminUserProfile, SessionAuthenticator};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 session tokens for the admin console.
#[derive(Clone)]
pub struct JwtSessionAuthenticator {
    secret: SecretString,
    ttl: Duration,
}

impl JwtSessionAuthenticator {
    pub fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }
}

impl SessionAuthenticator for JwtSessionAuthenticator {
    fn issue(&self, user: &AdminUserProfile) -> AppResult<String> {
        issue(user, &self.secret, self.ttl)
    }

    fn verify(&self, token: &str) -> AppResult<AdminClaims> {
        verify(token, &self.secret)
    }
}

pub fn issue(user: &AdminUserProfile, secret: &SecretString, ttl: Duration) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let exp = now + ttl.whole_seconds();
    let claims = AdminClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        iat: now,
        exp,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Expired, tampered and malformed tokens are all `Unauthorized`.
pub fn verify(token: &str, secret: &SecretString) -> AppResult<AdminClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected admin session token");
        AppError::Unauthorized
    })
}
