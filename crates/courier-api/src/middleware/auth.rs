//! Static bearer-token authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use courier_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that rejects requests whose `authorization` header is missing
/// or does not carry the configured service token.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("invalid authorization header format"))?;

    if token != state.config.server.auth_token {
        return Err(AppError::authentication("invalid token").into());
    }

    Ok(next.run(request).await)
}
