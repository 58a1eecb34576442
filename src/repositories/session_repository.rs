use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::auth::Session;
use crate::utils::errors::AppError;

pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a session for `user_id` lasting `ttl_seconds`.
    pub async fn create(&self, user_id: i64, ttl_seconds: u64) -> Result<Session, AppError> {
        let now = Utc::now();
        let ttl = Duration::seconds(ttl_seconds.min(i32::MAX as u64) as i64);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(now)
        .bind(now + ttl)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::in_memory_pool;
    use crate::models::user::NewUser;
    use crate::repositories::user_repository::UserRepository;

    async fn user(pool: &SqlitePool) -> i64 {
        UserRepository::new(pool.clone())
            .create(&NewUser {
                username: "ada".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                email: "ada@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_find_delete() {
        let pool = in_memory_pool().await.unwrap();
        let user_id = user(&pool).await;
        let repo = SessionRepository::new(pool);

        let session = repo.create(user_id, 3600).await.unwrap();
        assert!(!session.is_expired());

        let found = repo.find(&session.id).await.unwrap().unwrap();
        assert_eq!(found.user_id, user_id);

        assert!(repo.delete(&session.id).await.unwrap());
        assert!(repo.find(&session.id).await.unwrap().is_none());
        assert!(!repo.delete(&session.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_sessions() {
        let pool = in_memory_pool().await.unwrap();
        let user_id = user(&pool).await;
        let repo = SessionRepository::new(pool);

        let live = repo.create(user_id, 3600).await.unwrap();
        let stale = repo.create(user_id, 0).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        assert_eq!(repo.delete_expired().await.unwrap(), 1);
        assert!(repo.find(&live.id).await.unwrap().is_some());
        assert!(repo.find(&stale.id).await.unwrap().is_none());
    }
}
