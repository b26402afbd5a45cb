// Configuration loading
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str =
    "https://ce7jzbocq1.execute-api.ca-central-1.amazonaws.com/dev";
const DEFAULT_CONFIG_PATH: &str = "config/dashboard";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
    /// Exposes the schema-inspection passthrough routes
    pub debug_routes: bool,
}

/// Defaults for the dashboard query parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub default_user_id: i64,
    pub default_days: i64,
    pub chart_show_balance: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_user_id: 125,
            default_days: 30,
            chart_show_balance: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Defaults, then the optional file at `path`, then `UAD_*` environment
/// variables (`UAD_API__BASE_URL`, `UAD_SERVER__BIND_ADDR`, ...).
pub fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let dashboard = DashboardSettings::default();
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE_URL)?
        .set_default("api.timeout_secs", 15_i64)?
        .set_default(
            "api.user_agent",
            concat!("activity-dashboard/", env!("CARGO_PKG_VERSION")),
        )?
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("server.debug_routes", false)?
        .set_default("dashboard.default_user_id", dashboard.default_user_id)?
        .set_default("dashboard.default_days", dashboard.default_days)?
        .set_default("dashboard.chart_show_balance", dashboard.chart_show_balance)?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("UAD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
