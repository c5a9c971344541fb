//! API error surface.
//!
//! Handlers return [`ApiError`]; its `IntoResponse` records the failure in
//! a response extension, and the outermost [`format_errors`] middleware
//! turns that into the JSON body. Funnelling every failure through one
//! formatter keeps the body shape identical across all routes:
//! `{path, timestamp, message}` plus `validationErrors` when present.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::error;

use crate::messages;
use crate::services::AccountError;
use crate::validation::ValidationErrors;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
    validation_errors: Option<ValidationErrors>,
}

impl ApiError {
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            validation_errors: None,
        }
    }

    #[must_use]
    pub const fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: messages::VALIDATION_FAILURE,
            validation_errors: Some(errors),
        }
    }

    #[must_use]
    pub const fn unauthorized(message: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    #[must_use]
    pub const fn forbidden(message: &'static str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(errors) => Self::validation(errors),
            AccountError::AuthenticationFailed => {
                Self::unauthorized(messages::AUTHENTICATION_FAILURE)
            }
            AccountError::AccountNotActivated => {
                Self::forbidden(messages::INVALID_LOGIN_ACCOUNT_NOT_ACTIVATED)
            }
            AccountError::InvalidActivationToken => {
                Self::forbidden(messages::INVALID_ACTIVATION_TOKEN)
            }
            AccountError::InvalidResetToken => {
                Self::forbidden(messages::INVALID_PASSWORD_RESET_TOKEN)
            }
            AccountError::UnknownEmail => Self::new(
                StatusCode::NOT_FOUND,
                messages::INVALID_PASSWORD_RESET_UNKNOWN_MAIL,
            ),
            AccountError::Forbidden => Self::forbidden(messages::FORBIDDEN),
            AccountError::EmailDelivery(cause) => {
                error!("Email delivery failed: {}", cause);
                Self::new(StatusCode::BAD_GATEWAY, messages::EMAIL_FAILURE)
            }
            AccountError::Database(cause) => {
                error!("Database error: {}", cause);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR)
            }
            AccountError::Internal(cause) => {
                error!("Internal error: {}", cause);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR)
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Internal error: {:#}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR)
    }
}

/// Carried on the response so [`format_errors`] can build the body with
/// the request path in scope.
#[derive(Debug, Clone)]
struct Failure {
    message: &'static str,
    validation_errors: Option<ValidationErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(Failure {
            message: self.message,
            validation_errors: self.validation_errors,
        });
        response
    }
}

#[derive(Serialize)]
struct ErrorBody {
    path: String,
    timestamp: i64,
    message: &'static str,
    #[serde(rename = "validationErrors", skip_serializing_if = "Option::is_none")]
    validation_errors: Option<ValidationErrors>,
}

/// Outermost layer: rewrites any response carrying a [`Failure`] extension
/// into the uniform error body.
pub async fn format_errors(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    if let Some(failure) = response.extensions_mut().remove::<Failure>() {
        let body = ErrorBody {
            path,
            timestamp: chrono::Utc::now().timestamp_millis(),
            message: failure.message,
            validation_errors: failure.validation_errors,
        };
        return (response.status(), Json(body)).into_response();
    }

    response
}
