#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use dagbok::email::{EmailError, Mailer};
use dagbok::state::SharedState;
use dagbok::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailKind {
    Activation,
    PasswordReset,
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub kind: MailKind,
    pub to: String,
    pub token: String,
}

/// Test double for the SMTP transport: records outgoing mail and can be
/// switched into a failing mode.
#[derive(Default)]
pub struct RecordingMailer {
    fail: AtomicBool,
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_token(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|m| m.token.clone())
    }

    fn record(&self, kind: MailKind, to: &str, token: &str) -> Result<(), EmailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError::SendFailed("smtp unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(SentMail {
            kind,
            to: to.to_string(),
            token: token.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_account_activation(&self, to: &str, token: &str) -> Result<(), EmailError> {
        self.record(MailKind::Activation, to, token)
    }

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), EmailError> {
        self.record(MailKind::PasswordReset, to, token)
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<SharedState>,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn spawn_app() -> TestApp {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // Cheap hashing keeps the suite fast.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let mailer = Arc::new(RecordingMailer::default());
    let state = Arc::new(
        SharedState::with_mailer(config, Arc::clone(&mailer) as Arc<dyn Mailer>)
            .await
            .expect("failed to build test state"),
    );
    let router = dagbok::api::router(Arc::clone(&state));

    TestApp {
        router,
        state,
        mailer,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Registers and activates the standard test account.
    pub async fn register_activated_user(&self) {
        let (status, _) = self
            .post(
                "/users",
                json!({
                    "name": "Maxim Tsigalko",
                    "email": "user@mail.com",
                    "password": "P4ssword",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let token = self.mailer.last_token().expect("no activation mail sent");
        let (status, _) = self.post(&format!("/users/token/{token}"), json!({})).await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Logs the standard test account in and returns the session token.
    pub async fn login(&self) -> String {
        let (status, body) = self
            .post(
                "/auth",
                json!({"email": "user@mail.com", "password": "P4ssword"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("no token in response").to_string()
    }
}
