//! JWT helpers
//!
//! Tokens are HS256 and carry the session id they belong to; validity of
//! the session itself is checked against the store by the middleware.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::environment::EnvironmentConfig,
    models::auth::{JwtClaims, Session},
    utils::errors::AppError,
};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds.
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

pub fn generate_token(
    session: &Session,
    username: &str,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = JwtClaims {
        sub: session.user_id,
        sid: session.id.clone(),
        username: username.to_string(),
        exp: session.expires_at.timestamp() as usize,
        iat: session.created_at.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}

pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}
