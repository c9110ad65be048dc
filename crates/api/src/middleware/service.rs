//! Service-role extractor for privileged endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gravekeeper_core::error::CoreError;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the service-role key.
pub const SERVICE_KEY_HEADER: &str = "x-service-key";

/// Marker extractor: the request presented the configured service-role key.
///
/// Ordinary user sessions never hold this key, so handlers taking it are
/// unreachable from the client application.
#[derive(Debug, Clone, Copy)]
pub struct RequireServiceRole;

impl FromRequestParts<AppState> for RequireServiceRole {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.service_role_key.as_deref() else {
            return Err(AppError::Core(CoreError::Forbidden(
                "Service role is not configured".into(),
            )));
        };

        let presented = parts
            .headers
            .get(SERVICE_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {SERVICE_KEY_HEADER} header"
                )))
            })?;

        // Compare digests so the comparison time does not depend on the
        // length of the matching prefix.
        if Sha256::digest(presented.as_bytes()) != Sha256::digest(expected.as_bytes()) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Service role required".into(),
            )));
        }

        Ok(RequireServiceRole)
    }
}
