//! Authentication service
//!
//! Password hashing and the session lifecycle behind bearer tokens. A token
//! is only honoured while the session row it names exists and is unexpired,
//! so deleting the row is enough to log out.

use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::AuthResponse;
use crate::models::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::repositories::session_repository::SessionRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, verify_token, JwtConfig};

pub struct AuthService {
    sessions: SessionRepository,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(pool: SqlitePool, config: &EnvironmentConfig) -> Self {
        Self {
            sessions: SessionRepository::new(pool),
            jwt: JwtConfig::from(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
            .map_err(|e| AppError::Internal(format!("Error hashing password: {e}")))
    }

    pub async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(format!("password check task failed: {e}")))?
            .map_err(|e| AppError::Internal(format!("Error verifying password: {e}")))
    }

    /// Opens a session for `user` and signs a token for it. Expired
    /// sessions are swept first.
    pub async fn issue_session(&self, user: User) -> Result<AuthResponse, AppError> {
        let swept = self.sessions.delete_expired().await?;
        if swept > 0 {
            info!(count = swept, "expired sessions removed");
        }

        let session = self.sessions.create(user.id, self.jwt.expiration).await?;
        let token = generate_token(&session, &user.username, &self.jwt)?;

        info!(user_id = user.id, session_id = %session.id, "session opened");

        Ok(AuthResponse {
            token,
            expires_at: session.expires_at,
            user: user.into(),
        })
    }

    /// Resolves a bearer token to the user it was issued to.
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = verify_token(token, &self.jwt)?;

        let session = self
            .sessions
            .find(&claims.sid)
            .await?
            .filter(|s| s.user_id == claims.sub && !s.is_expired())
            .ok_or_else(|| {
                warn!(session_id = %claims.sid, "token for a closed or expired session");
                AppError::Unauthorized("Session has ended. Please log in again.".to_string())
            })?;

        Ok(AuthenticatedUser {
            user_id: session.user_id,
            session_id: session.id,
            username: claims.username,
        })
    }

    pub async fn end_session(&self, session_id: &str) -> Result<(), AppError> {
        if self.sessions.delete(session_id).await? {
            info!(session_id = %session_id, "session closed");
        }
        Ok(())
    }
}
