use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Токен из заголовка `Authorization: Bearer ...`
fn bearer_token(req: &Request<Body>) -> Result<String, StatusCode> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(StatusCode::UNAUTHORIZED)
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = super::jwt::validate_token(&token).await.map_err(|e| {
        tracing::debug!("token rejected: {:#}", e);
        StatusCode::UNAUTHORIZED
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
