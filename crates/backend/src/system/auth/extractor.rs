use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::TokenClaims;

/// Оператор, выполняющий запрос; claims кладёт `require_auth`.
///
/// Переходы статусов берут его, чтобы в журнале было видно, кто
/// нажал кнопку.
pub struct Operator(pub TokenClaims);

impl Operator {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<TokenClaims>() {
            Some(claims) => Ok(Operator(claims.clone())),
            None => {
                tracing::debug!("{} {}: no operator claims", parts.method, parts.uri.path());
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
