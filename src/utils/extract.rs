use axum::extract::FromRequest;

use crate::utils::errors::AppError;

/// `axum::Json` whose rejection is reported as an `AppError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct FormJson<T>(pub T);
