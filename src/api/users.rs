//! Registration and account activation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use super::types::MessageResponse;
use crate::messages;
use crate::services::NewAccount;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<Arc<SharedState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .account
        .register(NewAccount {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: messages::VALID_ACTIVATION_ACCOUNT_SENT,
    }))
}

pub async fn activate(
    State(state): State<Arc<SharedState>>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.account.activate(&token).await?;

    Ok(Json(MessageResponse {
        message: messages::VALID_ACTIVATION_TOKEN,
    }))
}
