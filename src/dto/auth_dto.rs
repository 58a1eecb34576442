use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(
            min = 1,
            max = 150,
            message = "Required. 150 characters or fewer."
        ),
        regex(
            path = "crate::utils::validation::USERNAME_RE",
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    #[serde(default)]
    pub username: String,
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    #[serde(default)]
    pub first_name: String,
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    #[serde(default)]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    #[serde(default)]
    pub email: String,
    #[validate(custom = "crate::utils::validation::validate_password")]
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Issued on login and registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_registration() {
        let form = request(json!({
            "username": "dispatcher",
            "email": "dispatch@example.com",
            "password1": "correct-horse",
            "password2": "correct-horse"
        }));
        assert!(form.validate().is_ok());
        assert_eq!(form.first_name, "");
    }

    #[test]
    fn test_bad_username_and_email() {
        let form = request(json!({
            "username": "two words",
            "email": "not-an-email",
            "password1": "12345678",
            "password2": "12345678"
        }));
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password1"));
    }
}
