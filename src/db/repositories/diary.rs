use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entities::{diaries, pages};

pub struct DiaryRepository {
    conn: DatabaseConnection,
}

impl DiaryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<diaries::Model>> {
        diaries::Entity::find()
            .filter(diaries::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query diary by user")
    }

    pub async fn create(&self, user_id: i32, name: &str) -> Result<diaries::Model> {
        let diary = diaries::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        diary
            .insert(&self.conn)
            .await
            .context("Failed to create diary")
    }

    pub async fn update_name(&self, diary: diaries::Model, name: &str) -> Result<diaries::Model> {
        let mut active: diaries::ActiveModel = diary.into();
        active.name = Set(name.to_string());
        active
            .update(&self.conn)
            .await
            .context("Failed to update diary")
    }

    /// Deletes a diary together with its pages.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        pages::Entity::delete_many()
            .filter(pages::Column::DiaryId.eq(id))
            .exec(&txn)
            .await?;

        let result = diaries::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed diary {}", id);
        }
        Ok(removed)
    }
}
