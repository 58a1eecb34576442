use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::auth::AuthenticatedUser;
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::FormJson;

/// Routes reachable without a session.
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login/", post(login))
        .route("/register/", post(register))
}

/// Routes acting on the caller's own session.
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/logout/", post(logout))
        .route("/me/", get(me))
}

async fn login(
    State(state): State<AppState>,
    FormJson(request): FormJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    Ok(Json(controller.login(request).await?))
}

async fn register(
    State(state): State<AppState>,
    FormJson(request): FormJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    Ok(Json(controller.logout(&user).await?))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    Ok(Json(controller.me(&user).await?))
}
