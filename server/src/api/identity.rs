//! Caller identity extraction
//!
//! Identity is asserted by whatever sits in front of the server (normally an
//! authenticating reverse proxy setting `x-forwarded-email`). Nothing here
//! verifies it.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use std::sync::Arc;

use campaign_manager_core::{core::AppState, log_debug, storage::StorageImpl, UserId};
use super::api_handlers::ErrorResponse;

/// The identity a request acts as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub UserId);

impl<S: StorageImpl> FromRequestParts<Arc<AppState<S>>> for Caller {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let server = &state.config.server;
        let from_header = parts
            .headers
            .get(server.identity_header.as_str())
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty());

        let raw = from_header.or(server.default_identity.as_deref());
        match raw.map(UserId::new) {
            Some(Ok(user)) => Ok(Caller(user)),
            _ => {
                log_debug!("Rejecting request without {} header", server.identity_header);
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new(format!(
                        "Missing caller identity ({} header)",
                        server.identity_header
                    ))),
                ))
            }
        }
    }
}
