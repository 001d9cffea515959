//! Bearer-token gate for protected routes.
//!
//! Rejections short-circuit here, so no upstream call is ever made for an
//! unauthenticated request. Decoded claims land in request extensions for
//! the handlers.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::debug;

use crate::auth::verify_token;

use super::error::WebError;
use super::server::AppState;

pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = bearer else {
        return WebError::unauthorized("missing bearer token").into_response();
    };

    match verify_token(token, &state.config.auth.jwt_secret, Utc::now().timestamp()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            debug!(error = %err, "rejected bearer token");
            WebError::forbidden("invalid token").into_response()
        }
    }
}
