// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    client_script, dashboard_json, dashboard_page, describe_table, health_check, sample_table,
};
use crate::presentation::templates::CLIENT_SCRIPT_PATH;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(dashboard_page))
        .route("/dashboard", get(dashboard_page))
        .route("/api/dashboard", get(dashboard_json))
        .route(CLIENT_SCRIPT_PATH, get(client_script));

    if state.debug_routes {
        router = router
            .route("/api/schema/:table", get(describe_table))
            .route("/api/schema/:table/sample", get(sample_table));
    }

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
