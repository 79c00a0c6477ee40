//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Full application: common routes, record routes, request tracing and a
/// body size limit. Over-limit bodies fail JSON extraction and come back as
/// a 400 "binding failed" envelope.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
