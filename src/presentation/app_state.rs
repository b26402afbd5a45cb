// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::DashboardSettings;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub defaults: DashboardSettings,
    pub debug_routes: bool,
}

impl AppState {
    pub fn new(
        dashboard_service: DashboardService,
        defaults: DashboardSettings,
        debug_routes: bool,
    ) -> Self {
        Self {
            dashboard_service,
            defaults,
            debug_routes,
        }
    }
}
