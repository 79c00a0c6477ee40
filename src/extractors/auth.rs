//! Bearer credential from the `Authorization` header.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::TokenService;
use crate::error::AppError;

/// The verified caller. Rejects with 401 "unauthorized" when the header is
/// missing, not a bearer credential, or the token does not verify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let claims = TokenService::from_ref(state).verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AppError::Unauthorized
        })?;
        Ok(AuthUser {
            user_id: claims.user_id,
            role: claims.name,
        })
    }
}
