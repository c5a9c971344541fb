//! Account lifecycle contract.
//!
//! Handlers talk to this trait; the sea-orm implementation lives in
//! [`super::account_service_impl`]. Keeping the seam here lets tests drive
//! the HTTP layer with the real implementation and a stubbed mailer.

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::email::EmailError;
use crate::entities::users;
use crate::validation::ValidationErrors;

/// Registration input as received from the client, before validation.
#[derive(Debug, Default)]
pub struct NewAccount {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<&users::Model> for UserSummary {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

pub struct AuthenticatedUser {
    pub user: UserSummary,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation failure")]
    Validation(ValidationErrors),

    #[error("Invalid activation token")]
    InvalidActivationToken,

    #[error("Incorrect credentials")]
    AuthenticationFailed,

    #[error("Account is not activated")]
    AccountNotActivated,

    #[error("Unknown e-mail address")]
    UnknownEmail,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid password reset token")]
    InvalidResetToken,

    #[error("E-mail delivery failed")]
    EmailDelivery(#[from] EmailError),

    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DbErr>() {
            Ok(db) => Self::Database(db),
            Err(other) => Self::Internal(other.to_string()),
        }
    }
}

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Validates and stores a new inactive account, then emails the
    /// activation token. The insert is rolled back if the email cannot be
    /// delivered.
    async fn register(&self, account: NewAccount) -> Result<(), AccountError>;

    /// Activates the account holding this token and consumes the token.
    async fn activate(&self, token: &str) -> Result<(), AccountError>;

    /// Verifies credentials and issues a session token.
    async fn authenticate(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthenticatedUser, AccountError>;

    /// Stores a reset token for the account and emails it.
    async fn request_password_reset(&self, email: Option<&str>) -> Result<(), AccountError>;

    /// Replaces the password of the account holding this reset token.
    async fn complete_password_reset(
        &self,
        token: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), AccountError>;
}
