use crate::auth::jwt::TokenService;
use crate::types::{AppError, Claims};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Validates the bearer token and injects its [`Claims`] into the request
/// extensions. Missing, malformed or rejected tokens answer 401.
pub async fn auth_middleware(
    token_service: Arc<TokenService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))
        .ok_or(AppError::Unauthorized)?;

    let claims = token_service
        .validate(token)
        .map_err(|_| AppError::Unauthorized)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn bearer_token(value: Option<&axum::http::HeaderValue>) -> Option<&str> {
    let value = value?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Extractor for the claims of the authenticated caller.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}
