//! Login, password reset and the session-token middleware.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use super::types::{AuthenticatedResponse, MessageResponse};
use crate::messages;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<Arc<SharedState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthenticatedResponse>, ApiError> {
    let authenticated = state
        .account
        .authenticate(body.email.as_deref(), body.password.as_deref())
        .await?;

    Ok(Json(AuthenticatedResponse {
        user: authenticated.user.into(),
        token: authenticated.token,
    }))
}

#[derive(Deserialize)]
pub struct PasswordResetRequest {
    pub email: Option<String>,
}

pub async fn request_password_reset(
    State(state): State<Arc<SharedState>>,
    Json(body): Json<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .account
        .request_password_reset(body.email.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: messages::VALID_PASSWORD_RESET_REQUEST,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateRequest {
    pub password_reset_token: Option<String>,
    pub password: Option<String>,
}

pub async fn update_password(
    State(state): State<Arc<SharedState>>,
    Json(body): Json<PasswordUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .account
        .complete_password_reset(
            body.password_reset_token.as_deref(),
            body.password.as_deref(),
        )
        .await?;

    Ok(Json(MessageResponse {
        message: messages::PASSWORD_RESET_SUCCESS,
    }))
}

/// Identity of the caller, inserted by [`authenticate`] for protected
/// routes.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Verifies the `Authorization` header (raw token or `Bearer` prefixed)
/// and makes the caller's identity available to the handler.
pub async fn authenticate(
    State(state): State<Arc<SharedState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim());

    let claims = token
        .filter(|t| !t.is_empty())
        .and_then(|t| state.sessions.verify(t))
        .ok_or_else(|| ApiError::unauthorized(messages::INVALID_JWT_TOKEN))?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}
