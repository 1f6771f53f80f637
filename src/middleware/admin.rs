// ============================================================================
// Admin Middleware - shared bearer token
// ============================================================================
//
// Every /api/admin route requires `Authorization: Bearer <ADMIN_TOKEN>`.
// The comparison runs in constant time.
//
// Usage:
//   .layer(middleware::from_fn_with_state(state.clone(), admin_middleware))
//
// ============================================================================

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::app::AppState;
use crate::middleware::error_handling::AppError;
use crate::middleware::request_id::get_request_id;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

pub fn token_matches(expected: &str, provided: &str) -> bool {
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
}

pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = bearer_token(&request)
        .map(|token| token_matches(&state.admin_token, token))
        .unwrap_or(false);

    if !authorized {
        let request_id = get_request_id(request.extensions())
            .map(|id| id.to_string())
            .unwrap_or_default();
        tracing::warn!(
            request_id = %request_id,
            "🔒 Admin access denied for {} {}",
            request.method(),
            request.uri().path()
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches() {
        assert!(token_matches("s3cret", "s3cret"));
        assert!(!token_matches("s3cret", "s3cre"));
        assert!(!token_matches("s3cret", "S3CRET"));
        assert!(!token_matches("", ""));
    }
}
