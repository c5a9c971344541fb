//! Diary and page endpoints. All of these sit behind the session-token
//! middleware; ownership follows from the authenticated user id, never
//! from the request body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use super::auth::AuthUser;
use super::error::ApiError;
use super::pagination;
use super::types::{DiaryDto, DiaryEnvelope, PageDto, PageListResponse};
use crate::db::NewPage;
use crate::messages;
use crate::state::SharedState;
use crate::validation::{
    check_page_content, check_page_date, check_page_time, check_page_title, ValidationErrors,
    Validator,
};

pub async fn get_diary(
    State(state): State<Arc<SharedState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DiaryEnvelope>, ApiError> {
    let diary = state.store.find_diary_by_user(auth.user_id).await?;
    Ok(Json(DiaryEnvelope {
        diary: diary.map(DiaryDto::from),
    }))
}

#[derive(Deserialize)]
pub struct DiaryRequest {
    pub name: Option<String>,
}

pub async fn create_diary(
    State(state): State<Arc<SharedState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<DiaryRequest>,
) -> Result<Json<DiaryEnvelope>, ApiError> {
    let name = validated_name(body.name.as_deref())?;

    // One diary per user.
    if state.store.find_diary_by_user(auth.user_id).await?.is_some() {
        return Err(ApiError::forbidden(messages::FORBIDDEN));
    }

    let diary = state.store.create_diary(auth.user_id, &name).await?;
    Ok(Json(DiaryEnvelope {
        diary: Some(diary.into()),
    }))
}

pub async fn update_diary(
    State(state): State<Arc<SharedState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<DiaryRequest>,
) -> Result<Json<DiaryEnvelope>, ApiError> {
    let name = validated_name(body.name.as_deref())?;

    let Some(diary) = state.store.find_diary_by_user(auth.user_id).await? else {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            messages::INVALID_NO_DIARY_FOR_USER,
        ));
    };

    let diary = state.store.update_diary_name(diary, &name).await?;
    Ok(Json(DiaryEnvelope {
        diary: Some(diary.into()),
    }))
}

pub async fn delete_diary(
    State(state): State<Arc<SharedState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, ApiError> {
    let Some(diary) = state.store.find_diary_by_user(auth.user_id).await? else {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            messages::INVALID_NO_DIARY_FOR_USER,
        ));
    };

    state.store.remove_diary(diary.id).await?;
    Ok(StatusCode::OK)
}

fn validated_name(name: Option<&str>) -> Result<String, ApiError> {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => {
            let mut errors = ValidationErrors::default();
            errors.add("name", messages::INVALID_NAME_EMPTY);
            Err(ApiError::validation(errors))
        }
    }
}

#[derive(Deserialize)]
pub struct PageRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize)]
pub struct PageEnvelope {
    pub page: PageDto,
}

pub async fn create_page(
    State(state): State<Arc<SharedState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<PageRequest>,
) -> Result<Json<PageEnvelope>, ApiError> {
    let mut validator = Validator::default();
    check_page_date(&mut validator, body.date.as_deref());
    check_page_time(&mut validator, body.time.as_deref());
    check_page_title(&mut validator, body.title.as_deref());
    check_page_content(&mut validator, body.content.as_deref());
    validator.finish().map_err(ApiError::validation)?;

    let Some(diary) = state.store.find_diary_by_user(auth.user_id).await? else {
        return Err(ApiError::forbidden(messages::FORBIDDEN));
    };

    let (Some(date), Some(time), Some(title), Some(content)) =
        (&body.date, &body.time, &body.title, &body.content)
    else {
        return Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            messages::INTERNAL_ERROR,
        ));
    };

    let page = state
        .store
        .create_page(NewPage {
            diary_id: diary.id,
            date: date.trim(),
            time: time.trim(),
            title: title.trim(),
            content: content.trim(),
        })
        .await?;

    Ok(Json(PageEnvelope { page: page.into() }))
}

pub async fn get_pages(
    State(state): State<Arc<SharedState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageListResponse>, ApiError> {
    let Some(diary) = state.store.find_diary_by_user(auth.user_id).await? else {
        return Err(ApiError::forbidden(messages::FORBIDDEN));
    };

    let (page, size) = pagination::resolve(
        params.get("page").map(String::as_str),
        params.get("size").map(String::as_str),
    );

    let slice = state.store.paginate_pages(diary.id, page, size).await?;

    Ok(Json(PageListResponse {
        content: slice.items.into_iter().map(PageDto::from).collect(),
        page,
        size,
        total_pages: slice.total_pages,
    }))
}
