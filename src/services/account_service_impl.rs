//! sea-orm backed [`AccountService`].

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, Set, SqlErr, TransactionTrait};
use tracing::{info, warn};

use super::account_service::{
    AccountError, AccountService, AuthenticatedUser, NewAccount, UserSummary,
};
use super::credentials::{generate_token, hash_password, verify_password};
use super::session::SessionTokens;
use crate::config::SecurityConfig;
use crate::db::Store;
use crate::email::Mailer;
use crate::entities::users;
use crate::messages;
use crate::validation::{check_email, check_name, check_password, Validator};

const TOKEN_LENGTH: usize = 32;

pub struct SeaOrmAccountService {
    store: Store,
    mailer: Arc<dyn Mailer>,
    sessions: Arc<SessionTokens>,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    pub fn new(
        store: Store,
        mailer: Arc<dyn Mailer>,
        sessions: Arc<SessionTokens>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            sessions,
            security,
        }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(&self, account: NewAccount) -> Result<(), AccountError> {
        let name = account.name.as_deref().map(str::trim);
        let email = account.email.as_deref().map(str::trim);
        let password = account.password.as_deref();

        let mut validator = Validator::default();
        check_name(&mut validator, name);
        check_email(&mut validator, email);
        check_password(&mut validator, password);

        // Uniqueness only makes sense for a syntactically valid address.
        if validator.passed("email") {
            if let Some(email) = email {
                if self.store.find_user_by_email(email).await?.is_some() {
                    validator.reject("email", messages::INVALID_EMAIL_IN_USE);
                }
            }
        }

        validator.finish().map_err(AccountError::Validation)?;

        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(AccountError::Internal(
                "validated registration fields missing".to_string(),
            ));
        };

        let password_hash = hash_password(password, &self.security).await?;
        let activation_token = generate_token(TOKEN_LENGTH);
        let now = chrono::Utc::now().to_rfc3339();

        // Insert and email delivery succeed or fail together: an account
        // whose activation mail never went out must not exist.
        let txn = self.store.conn.begin().await?;

        let insert = users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            inactive: Set(true),
            activation_token: Set(Some(activation_token.clone())),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        if let Err(err) = insert {
            txn.rollback().await?;
            // Lost the race against a concurrent registration for the same
            // address; report it the same way the validator would have.
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                let mut errors = crate::validation::ValidationErrors::default();
                errors.add("email", messages::INVALID_EMAIL_IN_USE);
                return Err(AccountError::Validation(errors));
            }
            return Err(AccountError::Database(err));
        }

        if let Err(err) = self
            .mailer
            .send_account_activation(email, &activation_token)
            .await
        {
            txn.rollback().await?;
            warn!("Activation email to {} failed: {}", email, err);
            return Err(AccountError::EmailDelivery(err));
        }

        txn.commit().await?;
        info!("Registered new account for {}", email);
        Ok(())
    }

    async fn activate(&self, token: &str) -> Result<(), AccountError> {
        let Some(user) = self.store.find_user_by_activation_token(token).await? else {
            return Err(AccountError::InvalidActivationToken);
        };
        let user = self.store.activate_user(user).await?;
        info!("Activated account {}", user.id);
        Ok(())
    }

    async fn authenticate(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthenticatedUser, AccountError> {
        // Uniform failure for missing fields, unknown addresses and wrong
        // passwords; the response never reveals which one it was.
        let (Some(email), Some(password)) = (
            email.map(str::trim).filter(|e| !e.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AccountError::AuthenticationFailed);
        };

        let Some(user) = self.store.find_user_by_email(email).await? else {
            return Err(AccountError::AuthenticationFailed);
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(AccountError::AuthenticationFailed);
        }

        if user.inactive {
            return Err(AccountError::AccountNotActivated);
        }

        let summary = UserSummary::from(&user);
        let token = self.sessions.issue(&summary)?;
        Ok(AuthenticatedUser {
            user: summary,
            token,
        })
    }

    async fn request_password_reset(&self, email: Option<&str>) -> Result<(), AccountError> {
        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return Err(AccountError::UnknownEmail);
        };

        let Some(user) = self.store.find_user_by_email(email).await? else {
            return Err(AccountError::UnknownEmail);
        };

        if user.inactive {
            return Err(AccountError::Forbidden);
        }

        let token = generate_token(TOKEN_LENGTH);
        let user = self.store.set_password_reset_token(user, &token).await?;

        // The token stays on the row even if delivery fails, so a retried
        // request keeps working with whichever mail arrived.
        if let Err(err) = self.mailer.send_password_reset(&user.email, &token).await {
            warn!("Password reset email to {} failed: {}", user.email, err);
            return Err(AccountError::EmailDelivery(err));
        }

        info!("Password reset requested for account {}", user.id);
        Ok(())
    }

    async fn complete_password_reset(
        &self,
        token: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), AccountError> {
        // Token legitimacy comes before password validation: a caller who
        // cannot prove a pending reset gets no feedback on the password.
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(AccountError::InvalidResetToken);
        };
        let Some(user) = self.store.find_user_by_password_reset_token(token).await? else {
            return Err(AccountError::InvalidResetToken);
        };

        let mut validator = Validator::default();
        check_password(&mut validator, password);
        validator.finish().map_err(AccountError::Validation)?;

        let Some(password) = password else {
            return Err(AccountError::Internal(
                "validated password missing".to_string(),
            ));
        };

        let hash = hash_password(password, &self.security).await?;
        let user = self.store.reset_password(user, &hash).await?;
        info!("Password reset completed for account {}", user.id);
        Ok(())
    }
}
