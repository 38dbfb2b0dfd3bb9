use super::{AppState, TOKEN_COOKIE};
use crate::adapters::http::error::ApiError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

/// Rejects task API calls without a valid session cookie (no-op when auth is disabled).
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookies.get(TOKEN_COOKIE).map(|c| c.value());
    if let Err(e) = state.auth.verify(token) {
        debug!(path = %request.uri().path(), error = %e, "unauthenticated request");
        return Err(e.into());
    }
    Ok(next.run(request).await)
}
