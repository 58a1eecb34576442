use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::api_dto::ApiResponse;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::auth::AuthenticatedUser;
use crate::models::user::{NewUser, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppError;
use crate::utils::validation::{add_field_error, collect_errors, ensure_valid};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

pub struct AuthController {
    users: UserRepository,
    auth: AuthService,
}

impl AuthController {
    pub fn new(pool: SqlitePool, config: &EnvironmentConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            auth: AuthService::new(pool, config),
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        let mut errors = collect_errors(request.validate());

        if request.password1 != request.password2 {
            add_field_error(&mut errors, "password2", "The two password fields didn't match.");
        } else if !request.username.is_empty()
            && request.password1.to_lowercase() == request.username.to_lowercase()
        {
            add_field_error(
                &mut errors,
                "password2",
                "The password is too similar to the username.",
            );
        }

        let username = request.username.trim();
        if !username.is_empty() && self.users.username_exists(username).await? {
            add_field_error(
                &mut errors,
                "username",
                "A user with that username already exists.",
            );
        }

        let email = request.email.trim();
        if !email.is_empty() && self.users.email_exists(email).await? {
            add_field_error(&mut errors, "email", "A user with that email already exists.");
        }

        ensure_valid(errors)?;

        let password_hash = self.auth.hash_password(&request.password1).await?;
        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;
        info!(user_id = user.id, username = %user.username, "user registered");

        let response = self.auth.issue_session(user).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Registration successful!",
        ))
    }

    /// Unknown users and wrong passwords fail with the same message.
    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<AuthResponse>, AppError> {
        let Some(user) = self.users.find_by_username(request.username.trim()).await? else {
            warn!(username = %request.username, "login for unknown user");
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        };

        if !self
            .auth
            .verify_password(&request.password, &user.password_hash)
            .await?
        {
            warn!(user_id = user.id, "login with wrong password");
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let message = format!("Welcome back, {}!", user.username);
        let response = self.auth.issue_session(user).await?;
        Ok(ApiResponse::success_with_message(response, message))
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<ApiResponse<()>, AppError> {
        self.auth.end_session(&user.session_id).await?;
        info!(user_id = user.user_id, "user logged out");
        Ok(ApiResponse::message("You have been logged out."))
    }

    pub async fn me(&self, user: &AuthenticatedUser) -> Result<UserResponse, AppError> {
        self.users
            .find_by_id(user.user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::in_memory_pool;
    use serde_json::json;

    fn config() -> EnvironmentConfig {
        EnvironmentConfig {
            bcrypt_cost: 4,
            ..EnvironmentConfig::default()
        }
    }

    fn register_request(username: &str, email: &str, p1: &str, p2: &str) -> RegisterRequest {
        serde_json::from_value(json!({
            "username": username,
            "email": email,
            "password1": p1,
            "password2": p2
        }))
        .unwrap()
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        serde_json::from_value(json!({ "username": username, "password": password })).unwrap()
    }

    fn field_keys(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => {
                let mut keys: Vec<&'static str> = errors.field_errors().keys().copied().collect();
                keys.sort_unstable();
                keys
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let controller = AuthController::new(in_memory_pool().await.unwrap(), &config());
        let registered = controller
            .register(register_request("ada", "ada@example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap();
        assert!(!registered.data.unwrap().token.is_empty());

        let logged_in = controller
            .login(login_request("ada", "correct-horse"))
            .await
            .unwrap();
        assert_eq!(logged_in.data.unwrap().user.username, "ada");
    }

    #[tokio::test]
    async fn test_register_rejects_mismatch_and_duplicates() {
        let controller = AuthController::new(in_memory_pool().await.unwrap(), &config());
        controller
            .register(register_request("ada", "ada@example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap();

        let err = controller
            .register(register_request("ada", "ada@example.com", "correct-horse", "other-horse"))
            .await
            .unwrap_err();
        assert_eq!(field_keys(err), vec!["email", "password2", "username"]);
    }

    #[tokio::test]
    async fn test_password_equal_to_username_rejected() {
        let controller = AuthController::new(in_memory_pool().await.unwrap(), &config());
        let err = controller
            .register(register_request("dispatcher", "d@example.com", "Dispatcher", "Dispatcher"))
            .await
            .unwrap_err();
        assert_eq!(field_keys(err), vec!["password2"]);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let controller = AuthController::new(in_memory_pool().await.unwrap(), &config());
        controller
            .register(register_request("ada", "ada@example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap();

        let unknown = controller.login(login_request("bob", "whatever1")).await.unwrap_err();
        let wrong = controller.login(login_request("ada", "wrong-horse")).await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(wrong, AppError::Authentication(ref m) if m == INVALID_CREDENTIALS));
    }
}
