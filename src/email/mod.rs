//! Outbound email.
//!
//! The account lifecycle only needs one capability: deliver a token to an
//! address. The `Mailer` trait keeps SMTP out of the service layer and
//! lets tests substitute a recording double.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::MailConfig;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Invalid mail configuration: {0}")]
    InvalidConfig(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_account_activation(&self, to: &str, token: &str) -> Result<(), EmailError>;

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), EmailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    client_base_url: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, EmailError> {
        let host = &config.smtp_host;

        let mut builder = if config.use_tls {
            let tls_params = TlsParameters::new(host.clone())
                .map_err(|e| EmailError::InvalidConfig(format!("TLS configuration error: {e}")))?;

            // Port 465 uses implicit TLS (SMTPS), other ports use STARTTLS.
            if config.smtp_port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| EmailError::InvalidConfig(format!("SMTP relay error: {e}")))?
                    .port(config.smtp_port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| EmailError::InvalidConfig(format!("SMTP relay error: {e}")))?
                    .port(config.smtp_port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(config.smtp_port)
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
            client_base_url: config.client_base_url.clone(),
        })
    }

    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| EmailError::InvalidConfig(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| EmailError::InvalidConfig(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| EmailError::SendFailed(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_account_activation(&self, to: &str, token: &str) -> Result<(), EmailError> {
        let html = format!(
            "<div><b>Please click the link below to activate your account</b></div>\
             <div><a href=\"{}/#/login?token={token}\">Activate</a></div>",
            self.client_base_url
        );
        self.send(to, "Account Activation", html).await
    }

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), EmailError> {
        let html = format!(
            "<div><b>Please click the link below to reset your password</b></div>\
             <div><a href=\"{}/#/password-reset?reset={token}\">Reset</a></div>",
            self.client_base_url
        );
        self.send(to, "Password Reset", html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;

    #[tokio::test]
    async fn mailer_builds_without_tls() {
        let config = MailConfig::default();
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[tokio::test]
    async fn mailer_builds_with_credentials_and_tls() {
        let config = MailConfig {
            smtp_port: 465,
            use_tls: true,
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            ..MailConfig::default()
        };
        assert!(SmtpMailer::new(&config).is_ok());
    }
}
