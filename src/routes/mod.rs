pub mod submissions;

use axum::routing::{any, post};
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", any(hello))
        .route("/submissions", any(submissions::list))
        // Only POST updates; other methods fall through to a plain 404.
        .route("/update", post(submissions::update).fallback(not_found))
}

pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
