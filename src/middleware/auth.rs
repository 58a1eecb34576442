//! Session authentication middleware
//!
//! Resolves the bearer token to an `AuthenticatedUser` and injects it into
//! the request extensions. Browsers without a valid session are sent to the
//! login page; other clients get a 401 naming the login URL.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const LOGIN_URL: &str = "/login/";

pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let outcome = match bearer_token(request.headers()) {
        Some(token) => {
            AuthService::new(state.pool.clone(), &state.config)
                .authenticate_token(&token)
                .await
        }
        None => Err(AppError::Unauthorized(
            "Authentication credentials were not provided.".to_string(),
        )),
    };

    match outcome {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AppError::Unauthorized(_)) if prefers_html(request.headers()) => {
            Redirect::to(&format!("{LOGIN_URL}?next={}", request.uri().path())).into_response()
        }
        Err(err) => err.into_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// True when the first of `text/html` and `application/json` named in the
/// `Accept` header is `text/html`.
fn prefers_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    for media_type in accept.split(',') {
        match media_type.split(';').next().map(str::trim) {
            Some("text/html") => return true,
            Some("application/json") => return false,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(
            bearer_token(&headers(header::AUTHORIZATION, "Bearer abc.def")).as_deref(),
            Some("abc.def")
        );
        assert_eq!(bearer_token(&headers(header::AUTHORIZATION, "Basic abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_prefers_html() {
        assert!(prefers_html(&headers(
            header::ACCEPT,
            "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"
        )));
        assert!(!prefers_html(&headers(header::ACCEPT, "application/json, text/html")));
        assert!(!prefers_html(&headers(header::ACCEPT, "*/*")));
        assert!(!prefers_html(&HeaderMap::new()));
    }
}
