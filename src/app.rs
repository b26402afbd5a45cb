// Dependency injection
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::activity_api::ActivityApiClient;
use crate::infrastructure::config::AppConfig;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;
use axum::Router;
use std::sync::Arc;

/// Wires the API client, service and state into the router.
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    // Create repository (infrastructure layer)
    let repository = Arc::new(ActivityApiClient::new(&config.api)?);
    tracing::info!(base_url = repository.base_url(), "Using activity API");

    // Create service (application layer)
    let dashboard_service = DashboardService::new(repository);

    let state = Arc::new(AppState::new(
        dashboard_service,
        config.dashboard.clone(),
        config.server.debug_routes,
    ));

    Ok(router(state))
}
