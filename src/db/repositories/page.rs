use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::pages;

pub struct NewPage<'a> {
    pub diary_id: i32,
    pub date: &'a str,
    pub time: &'a str,
    pub title: &'a str,
    pub content: &'a str,
}

/// One page of results plus the page count for the whole set.
pub struct PageSlice {
    pub items: Vec<pages::Model>,
    pub total_pages: u64,
}

pub struct PageRepository {
    conn: DatabaseConnection,
}

impl PageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, page: NewPage<'_>) -> Result<pages::Model> {
        let model = pages::ActiveModel {
            diary_id: Set(page.diary_id),
            date: Set(page.date.to_string()),
            time: Set(page.time.to_string()),
            title: Set(page.title.to_string()),
            content: Set(page.content.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        model
            .insert(&self.conn)
            .await
            .context("Failed to create page")
    }

    /// Fetches one page of a diary's pages in insertion order. Requesting
    /// past the end yields an empty slice, never an error.
    pub async fn paginate(&self, diary_id: i32, page: u64, size: u64) -> Result<PageSlice> {
        let paginator = pages::Entity::find()
            .filter(pages::Column::DiaryId.eq(diary_id))
            .order_by_asc(pages::Column::Id)
            .paginate(&self.conn, size);

        let total_pages = paginator
            .num_pages()
            .await
            .context("Failed to count pages")?;
        let items = paginator
            .fetch_page(page)
            .await
            .context("Failed to fetch page slice")?;

        Ok(PageSlice { items, total_pages })
    }
}
