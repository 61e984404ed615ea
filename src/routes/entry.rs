use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, cors_layer, json_error_middleware},
    state::AppState,
};

use super::todos;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(todos::router(state))
}

/// The full HTTP stack: routes plus error normalisation, panic recovery, CORS
/// and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
