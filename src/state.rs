use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::db::Store;
use crate::email::{Mailer, SmtpMailer};
use crate::services::session::SessionTokens;
use crate::services::{AccountService, SeaOrmAccountService};

/// Everything the handlers need, shared behind an `Arc`.
pub struct SharedState {
    pub config: Config,
    pub store: Store,
    pub mailer: Arc<dyn Mailer>,
    pub sessions: Arc<SessionTokens>,
    pub account: Arc<dyn AccountService>,
}

impl SharedState {
    pub async fn new(config: Config) -> Result<Self> {
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.mail)?);
        Self::with_mailer(config, mailer).await
    }

    /// Builds the state around a caller-supplied mailer; tests use this to
    /// capture outgoing mail instead of speaking SMTP.
    pub async fn with_mailer(config: Config, mailer: Arc<dyn Mailer>) -> Result<Self> {
        config.validate()?;

        let store = Store::new(&config.general.database_path).await?;
        let sessions = Arc::new(SessionTokens::new(&config.security.jwt_secret));
        let account: Arc<dyn AccountService> = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            Arc::clone(&mailer),
            Arc::clone(&sessions),
            config.security.clone(),
        ));

        Ok(Self {
            config,
            store,
            mailer,
            sessions,
            account,
        })
    }
}
