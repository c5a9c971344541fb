//! HTTP surface.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub mod auth;
pub mod diary;
pub mod error;
pub mod pagination;
pub mod types;
pub mod users;

pub fn router(state: Arc<SharedState>) -> Router {
    let protected = Router::new()
        .route(
            "/diary",
            get(diary::get_diary)
                .post(diary::create_diary)
                .put(diary::update_diary)
                .delete(diary::delete_diary),
        )
        .route("/diary/page", post(diary::create_page).get(diary::get_pages))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::authenticate,
        ));

    Router::new()
        .route("/users", post(users::register))
        .route("/users/token/{token}", post(users::activate))
        .route("/auth", post(auth::login))
        .route("/auth/password-reset", post(auth::request_password_reset))
        .route("/auth/password-update", put(auth::update_password))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Outermost so every failure, middleware included, gets the
        // uniform body.
        .layer(middleware::from_fn(error::format_errors))
        .with_state(state)
}
