//! Response DTOs.

use serde::Serialize;

use crate::entities::{diaries, pages};
use crate::services::UserSummary;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for UserDto {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Serialize)]
pub struct AuthenticatedResponse {
    pub user: UserDto,
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
}

impl From<diaries::Model> for DiaryDto {
    fn from(diary: diaries::Model) -> Self {
        Self {
            id: diary.id,
            user_id: diary.user_id,
            name: diary.name,
        }
    }
}

/// `diary` is null when the user has not created one yet.
#[derive(Serialize)]
pub struct DiaryEnvelope {
    pub diary: Option<DiaryDto>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub id: i32,
    pub diary_id: i32,
    pub date: String,
    pub time: String,
    pub title: String,
    pub content: String,
}

impl From<pages::Model> for PageDto {
    fn from(page: pages::Model) -> Self {
        Self {
            id: page.id,
            diary_id: page.diary_id,
            date: page.date,
            time: page.time,
            title: page.title,
            content: page.content,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageListResponse {
    pub content: Vec<PageDto>,
    pub page: u64,
    pub size: u64,
    pub total_pages: u64,
}
