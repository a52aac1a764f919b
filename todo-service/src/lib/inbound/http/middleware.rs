use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified caller on protected requests.
///
/// Built purely from the token; the user store is not consulted here, so a
/// deleted user's unexpired token still passes this layer.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Option<String>,
}

/// Middleware validating the bearer token on every protected route.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let current = state.resolver.resolve(token).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::Unauthorized("Invalid authentication credentials".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(current.id),
        username: current.username,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Not authenticated".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Not authenticated".to_string()).into_response()
    })?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()).into_response())
}
