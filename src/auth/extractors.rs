use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::{
    claims::Claims,
    jwt::{JwtKeys, TokenError},
};
use crate::error::ApiError;

/// Returns the token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Verified token claims of the caller. Rejects with 401 when the token is
/// missing or expired and with 403 when it is present but invalid.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            warn!("missing bearer token");
            ApiError::unauthorized("Token de acceso requerido")
        })?;

        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(TokenError::Expired) => {
                warn!("expired token");
                Err(ApiError::unauthorized("Token expirado"))
            }
            Err(e) => {
                warn!(error = %e, "invalid token");
                Err(ApiError::forbidden("Token inválido"))
            }
        }
    }
}
