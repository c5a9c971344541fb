use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::page::{NewPage, PageSlice};

use crate::entities::{diaries, pages, users};

/// Shared handle to the database. Cloning is cheap; all repositories run
/// on the same underlying pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        // A pooled in-memory SQLite gives every connection its own empty
        // database, so pin it to a single connection.
        if db_url.contains(":memory:") {
            Self::with_pool_options(db_url, 1, 1).await
        } else {
            Self::with_pool_options(db_url, 5, 1).await
        }
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn diary_repo(&self) -> repositories::diary::DiaryRepository {
        repositories::diary::DiaryRepository::new(self.conn.clone())
    }

    fn page_repo(&self) -> repositories::page::PageRepository {
        repositories::page::PageRepository::new(self.conn.clone())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().find_by_email(email).await
    }

    pub async fn find_user_by_activation_token(
        &self,
        token: &str,
    ) -> Result<Option<users::Model>> {
        self.user_repo().find_by_activation_token(token).await
    }

    pub async fn find_user_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<users::Model>> {
        self.user_repo().find_by_password_reset_token(token).await
    }

    pub async fn activate_user(&self, user: users::Model) -> Result<users::Model> {
        self.user_repo().activate(user).await
    }

    pub async fn set_password_reset_token(
        &self,
        user: users::Model,
        token: &str,
    ) -> Result<users::Model> {
        self.user_repo().set_password_reset_token(user, token).await
    }

    pub async fn reset_password(
        &self,
        user: users::Model,
        password_hash: &str,
    ) -> Result<users::Model> {
        self.user_repo().reset_password(user, password_hash).await
    }

    pub async fn find_diary_by_user(&self, user_id: i32) -> Result<Option<diaries::Model>> {
        self.diary_repo().find_by_user(user_id).await
    }

    pub async fn create_diary(&self, user_id: i32, name: &str) -> Result<diaries::Model> {
        self.diary_repo().create(user_id, name).await
    }

    pub async fn update_diary_name(
        &self,
        diary: diaries::Model,
        name: &str,
    ) -> Result<diaries::Model> {
        self.diary_repo().update_name(diary, name).await
    }

    pub async fn remove_diary(&self, id: i32) -> Result<bool> {
        self.diary_repo().remove(id).await
    }

    pub async fn create_page(&self, page: NewPage<'_>) -> Result<pages::Model> {
        self.page_repo().create(page).await
    }

    pub async fn paginate_pages(&self, diary_id: i32, page: u64, size: u64) -> Result<PageSlice> {
        self.page_repo().paginate(diary_id, page, size).await
    }
}
