use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::SharedState;

/// Proof that the request carried `Authorization: Bearer <SECRET_KEY>`.
///
/// The header must match byte for byte. Without a configured secret nothing
/// is accepted.
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

impl FromRequestParts<SharedState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Some(secret) = state.config.secret_key.as_deref().filter(|s| !s.is_empty()) else {
            tracing::warn!("Rejecting request: SECRET_KEY is not configured");
            return Err(AppError::Unauthorized);
        };

        let provided = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let expected = format!("Bearer {secret}");
        if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(Authorized)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
