use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::users;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")
    }

    pub async fn find_by_activation_token(&self, token: &str) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::ActivationToken.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query user by activation token")
    }

    pub async fn find_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::PasswordResetToken.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query user by password reset token")
    }

    /// Clears the activation token and marks the account active. One-way:
    /// nothing ever sets `inactive` back to true.
    pub async fn activate(&self, user: users::Model) -> Result<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.inactive = Set(false);
        active.activation_token = Set(None);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active
            .update(&self.conn)
            .await
            .context("Failed to activate user")
    }

    /// Overwrites any outstanding reset token with a fresh one.
    pub async fn set_password_reset_token(
        &self,
        user: users::Model,
        token: &str,
    ) -> Result<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.password_reset_token = Set(Some(token.to_string()));
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active
            .update(&self.conn)
            .await
            .context("Failed to store password reset token")
    }

    /// Installs the new password hash and consumes the reset token.
    pub async fn reset_password(
        &self,
        user: users::Model,
        password_hash: &str,
    ) -> Result<users::Model> {
        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(password_hash.to_string());
        active.password_reset_token = Set(None);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active
            .update(&self.conn)
            .await
            .context("Failed to update password")
    }
}
