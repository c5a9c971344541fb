mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{spawn_app, MailKind, TestApp};

async fn request_reset(app: &TestApp) -> String {
    let (status, _) = app
        .post("/auth/password-reset", json!({"email": "user@mail.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    app.mailer.last_token().expect("no reset mail sent")
}

#[tokio::test]
async fn reset_request_stores_token_and_sends_email() {
    let app = spawn_app().await;
    app.register_activated_user().await;

    let (status, body) = app
        .post("/auth/password-reset", json!({"email": "user@mail.com"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Check your e-mail for resetting your password");

    let sent = app.mailer.sent();
    let reset = sent.last().unwrap();
    assert_eq!(reset.kind, MailKind::PasswordReset);
    assert_eq!(reset.to, "user@mail.com");

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.password_reset_token.as_deref(), Some(reset.token.as_str()));
}

#[tokio::test]
async fn reset_request_for_unknown_email_returns_404() {
    let app = spawn_app().await;

    let (status, body) = app
        .post("/auth/password-reset", json!({"email": "nobody@mail.com"}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "E-mail is not recognized");
}

#[tokio::test]
async fn reset_request_for_inactive_account_returns_403() {
    let app = spawn_app().await;
    app.post(
        "/users",
        json!({
            "name": "Maxim Tsigalko",
            "email": "user@mail.com",
            "password": "P4ssword",
        }),
    )
    .await;

    let (status, body) = app
        .post("/auth/password-reset", json!({"email": "user@mail.com"}))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You are not allowed to perform this operation"
    );
}

#[tokio::test]
async fn reset_request_email_failure_returns_502() {
    let app = spawn_app().await;
    app.register_activated_user().await;
    app.mailer.set_failing(true);

    let (status, body) = app
        .post("/auth/password-reset", json!({"email": "user@mail.com"}))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "E-mail failure");

    // The token stays on the row so a later retry can still succeed.
    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.password_reset_token.is_some());
}

#[tokio::test]
async fn password_update_with_valid_token_changes_the_password() {
    let app = spawn_app().await;
    app.register_activated_user().await;
    let token = request_reset(&app).await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/auth/password-update",
            Some(json!({"passwordResetToken": token, "password": "N3wPassword"})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password updated successfully");

    // Old password no longer works, new one does.
    let (old_status, _) = app
        .post(
            "/auth",
            json!({"email": "user@mail.com", "password": "P4ssword"}),
        )
        .await;
    assert_eq!(old_status, StatusCode::UNAUTHORIZED);

    let (new_status, _) = app
        .post(
            "/auth",
            json!({"email": "user@mail.com", "password": "N3wPassword"}),
        )
        .await;
    assert_eq!(new_status, StatusCode::OK);
}

#[tokio::test]
async fn password_update_consumes_the_token() {
    let app = spawn_app().await;
    app.register_activated_user().await;
    let token = request_reset(&app).await;

    app.request(
        Method::PUT,
        "/auth/password-update",
        Some(json!({"passwordResetToken": token, "password": "N3wPassword"})),
        None,
    )
    .await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/auth/password-update",
            Some(json!({"passwordResetToken": token, "password": "An0therPass"})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn password_update_with_invalid_token_returns_403() {
    let app = spawn_app().await;
    app.register_activated_user().await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/auth/password-update",
            Some(json!({"passwordResetToken": "bogus", "password": "N3wPassword"})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "The password reset token is invalid");
}

#[tokio::test]
async fn invalid_token_beats_invalid_password() {
    let app = spawn_app().await;
    app.register_activated_user().await;

    // Both the token and the password are bad; the token check wins.
    let (status, body) = app
        .request(
            Method::PUT,
            "/auth/password-update",
            Some(json!({"passwordResetToken": "bogus", "password": "short"})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "The password reset token is invalid");
}

#[tokio::test]
async fn valid_token_with_invalid_password_returns_validation_failure() {
    let app = spawn_app().await;
    app.register_activated_user().await;
    let token = request_reset(&app).await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/auth/password-update",
            Some(json!({"passwordResetToken": token, "password": "short"})),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failure");
    assert_eq!(
        body["validationErrors"]["password"],
        "Password should be at least 8 characters long"
    );

    // A failed validation leaves the token intact.
    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.password_reset_token.is_some());
}
