use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::user::{NewUser, User};
use crate::utils::errors::{map_unique_violation, AppError};

const UNIQUE_FIELDS: &[(&str, &str, &str)] = &[
    (
        "users.username",
        "username",
        "A user with that username already exists.",
    ),
    ("users.email", "email", "A user with that email already exists."),
];

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, first_name, last_name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Exact match, as typed at login.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = ?1 COLLATE BINARY",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Usernames differing only by case count as taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE lower(username) = lower(?1))")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Emails compare case-insensitively.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower(?1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::in_memory_pool;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            first_name: "Ada".to_string(),
            last_name: String::new(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = UserRepository::new(in_memory_pool().await.unwrap());
        let user = repo.create(&new_user("ada", "ada@example.com")).await.unwrap();

        let by_name = repo.find_by_username("ada").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert!(repo.find_by_id(user.id).await.unwrap().is_some());
        assert!(repo.username_exists("ada").await.unwrap());
        assert!(repo.email_exists("ADA@example.com").await.unwrap());
        assert!(!repo.email_exists("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_field_error() {
        let repo = UserRepository::new(in_memory_pool().await.unwrap());
        repo.create(&new_user("ada", "ada@example.com")).await.unwrap();

        match repo
            .create(&new_user("ada", "other@example.com"))
            .await
            .unwrap_err()
        {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("username"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_names_and_emails_are_unique_ignoring_case() {
        let repo = UserRepository::new(in_memory_pool().await.unwrap());
        repo.create(&new_user("ada", "ada@example.com")).await.unwrap();

        assert!(repo.username_exists("ADA").await.unwrap());
        assert!(repo.find_by_username("ADA").await.unwrap().is_none());

        match repo
            .create(&new_user("Ada", "other@example.com"))
            .await
            .unwrap_err()
        {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("username"))
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match repo
            .create(&new_user("bob", "ADA@Example.COM"))
            .await
            .unwrap_err()
        {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("email"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
