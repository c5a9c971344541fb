mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{spawn_app, MailKind};

fn valid_user() -> serde_json::Value {
    json!({
        "name": "Maxim Tsigalko",
        "email": "user@mail.com",
        "password": "P4ssword",
    })
}

#[tokio::test]
async fn registers_a_valid_user() {
    let app = spawn_app().await;

    let (status, body) = app.post("/users", valid_user()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account activation link sent to user email");
}

#[tokio::test]
async fn saves_user_inactive_with_hashed_password_and_token() {
    let app = spawn_app().await;

    app.post("/users", valid_user()).await;

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .expect("user not saved");
    assert_eq!(user.name, "Maxim Tsigalko");
    assert!(user.inactive);
    assert!(user.activation_token.is_some());
    assert_ne!(user.password_hash, "P4ssword");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn sends_activation_email_containing_the_stored_token() {
    let app = spawn_app().await;

    app.post("/users", valid_user()).await;

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, MailKind::Activation);
    assert_eq!(sent[0].to, "user@mail.com");

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.activation_token.as_deref(), Some(sent[0].token.as_str()));
}

#[tokio::test]
async fn rejects_invalid_fields_with_field_messages() {
    let app = spawn_app().await;

    let cases = [
        (json!({"email": "user@mail.com", "password": "P4ssword"}), "name", "Name cannot be empty"),
        (json!({"name": "ab", "email": "user@mail.com", "password": "P4ssword"}), "name", "Name must be at least 3 characters long"),
        (json!({"name": "Maxim Tsigalko", "password": "P4ssword"}), "email", "The Email provided is invalid, please provide valid email"),
        (json!({"name": "Maxim Tsigalko", "email": "mail.com", "password": "P4ssword"}), "email", "The Email provided is invalid, please provide valid email"),
        (json!({"name": "Maxim Tsigalko", "email": "user@mail.com"}), "password", "Password cannot be empty"),
        (json!({"name": "Maxim Tsigalko", "email": "user@mail.com", "password": "P4ssw"}), "password", "Password should be at least 8 characters long"),
        (json!({"name": "Maxim Tsigalko", "email": "user@mail.com", "password": "alllowercase"}), "password", "Password should contain small letter, Capital letter and a number"),
        (json!({"name": "Maxim Tsigalko", "email": "user@mail.com", "password": "1234567890"}), "password", "Password should contain small letter, Capital letter and a number"),
    ];

    for (body, field, expected) in cases {
        let (status, response) = app.post("/users", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["message"], "Validation failure");
        assert_eq!(
            response["validationErrors"][field], expected,
            "body: {body}"
        );
    }
}

#[tokio::test]
async fn reports_all_invalid_fields_at_once() {
    let app = spawn_app().await;

    let (status, body) = app.post("/users", json!({"password": "P4ssword"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["validationErrors"].as_object().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("email"));
}

#[tokio::test]
async fn rejects_email_already_in_use() {
    let app = spawn_app().await;
    app.post("/users", valid_user()).await;

    let (status, body) = app.post("/users", valid_user()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["validationErrors"]["email"],
        "The Email provided is already in use"
    );
}

#[tokio::test]
async fn email_failure_returns_502_and_saves_no_user() {
    let app = spawn_app().await;
    app.mailer.set_failing(true);

    let (status, body) = app.post("/users", valid_user()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "E-mail failure");
    assert!(app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn error_body_carries_path_and_timestamp() {
    let app = spawn_app().await;

    let before = chrono::Utc::now().timestamp_millis();
    let (status, body) = app.post("/users", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["path"], "/users");
    assert!(body["timestamp"].as_i64().unwrap() >= before);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn activation_with_valid_token_activates_the_account() {
    let app = spawn_app().await;
    app.post("/users", valid_user()).await;
    let token = app.mailer.last_token().unwrap();

    let (status, body) = app.post(&format!("/users/token/{token}"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The account activated successfully");

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.inactive);
    assert!(user.activation_token.is_none());
}

#[tokio::test]
async fn activation_with_unknown_token_returns_403() {
    let app = spawn_app().await;
    app.post("/users", valid_user()).await;

    let (status, body) = app
        .post("/users/token/this-token-does-not-exist", json!({}))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "The activation link is invalid");

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.inactive);
}

#[tokio::test]
async fn activation_token_is_single_use() {
    let app = spawn_app().await;
    app.post("/users", valid_user()).await;
    let token = app.mailer.last_token().unwrap();

    app.post(&format!("/users/token/{token}"), json!({})).await;
    let (status, _) = app.post(&format!("/users/token/{token}"), json!({})).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn trims_name_before_saving() {
    let app = spawn_app().await;

    app.post(
        "/users",
        json!({
            "name": "  Maxim Tsigalko  ",
            "email": "user@mail.com",
            "password": "P4ssword",
        }),
    )
    .await;

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Maxim Tsigalko");
}

#[tokio::test]
async fn client_cannot_register_an_already_active_account() {
    let app = spawn_app().await;

    let mut body = valid_user();
    body["inactive"] = json!(false);
    app.post("/users", body).await;

    let user = app
        .state
        .store
        .find_user_by_email("user@mail.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.inactive);
}

#[tokio::test]
async fn unknown_route_is_not_reformatted() {
    let app = spawn_app().await;

    let (status, _) = app
        .request(Method::GET, "/nope", None, None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
