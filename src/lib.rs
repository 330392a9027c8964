pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod airtable;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::airtable::{AirtableClient, UpstreamError};
use crate::config::Config;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Result<Router, UpstreamError> {
    if config.secret_key.as_deref().is_none_or(str::is_empty) {
        tracing::warn!("SECRET_KEY is not set, protected routes will reject every request");
    }
    if config.usable_airtable_key().is_none() {
        tracing::warn!("AIRTABLE_KEY is not set or invalid, upstream calls are disabled");
    }

    let airtable = AirtableClient::new(config.airtable.clone())?;
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState { config, airtable });

    let app = Router::new()
        .merge(routes::api_routes())
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state);

    Ok(app)
}
