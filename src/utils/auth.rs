// src/utils/auth.rs

use axum::{
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// The caller's bearer token, forwarded verbatim to the test-data API,
/// which is the party that actually verifies it.
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Axum Middleware: Bearer extraction.
///
/// Reads the 'Authorization: Bearer <token>' header and injects a
/// `BearerToken` into the request extensions. Missing or empty tokens
/// are rejected with 401 before any upstream call is made.
pub async fn bearer_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::AuthError("Missing bearer token".to_string()))?;

    req.extensions_mut().insert(BearerToken(token));
    Ok(next.run(req).await)
}
