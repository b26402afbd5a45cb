// HTTP request handlers
use crate::domain::dashboard::{Dashboard, DateWindow};
use crate::domain::error::DashboardError;
use crate::infrastructure::config::DashboardSettings;
use crate::presentation::app_state::AppState;
use crate::presentation::chart::ChartKind;
use crate::presentation::errors::{JsonError, PageError};
use crate::presentation::templates::{RenderOptions, render_dashboard};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const CLIENT_SCRIPT: &str = include_str!("../../assets/uad-scripts.js");
const DEFAULT_SAMPLE_LIMIT: i64 = 5;

/// Dashboard parameters. Everything is optional and arrives as text, so that
/// malformed values fall back the same way the embed attributes always have.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub user_id: Option<String>,
    pub days: Option<String>,
    pub show_chart: Option<String>,
    pub show_table: Option<String>,
    pub uad_start_date: Option<String>,
    pub uad_end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub user_id: i64,
    pub window: DateWindow,
    pub show_chart: bool,
    pub show_table: bool,
}

impl DashboardQuery {
    pub fn resolve(&self, defaults: &DashboardSettings, today: NaiveDate) -> DashboardParams {
        // Unparseable ids become 0 and are rejected by validation downstream
        let user_id = match self.user_id.as_deref() {
            Some(raw) => raw.trim().parse().unwrap_or(0),
            None => defaults.default_user_id,
        };
        let days = self
            .days
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(defaults.default_days);

        DashboardParams {
            user_id,
            window: DateWindow::resolve(
                today,
                days,
                self.uad_start_date.as_deref(),
                self.uad_end_date.as_deref(),
            ),
            show_chart: self.show_chart.as_deref().map(parse_flag).unwrap_or(true),
            show_table: self.show_table.as_deref().map(parse_flag).unwrap_or(true),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Deserialize)]
pub struct SampleQuery {
    pub limit: Option<i64>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn load_dashboard(
    state: &AppState,
    params: &DashboardParams,
) -> Result<Dashboard, DashboardError> {
    state
        .dashboard_service
        .get_dashboard(params.user_id, params.window)
        .await
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Rendered dashboard page
pub async fn dashboard_page(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    let today = today();
    let params = query.resolve(&state.defaults, today);
    let dashboard = load_dashboard(&state, &params).await?;

    let options = RenderOptions {
        show_chart: params.show_chart,
        show_table: params.show_table,
        chart_kind: if state.defaults.chart_show_balance {
            ChartKind::DualAxis
        } else {
            ChartKind::Line
        },
        today,
    };

    Ok(Html(render_dashboard(&dashboard, &options)?))
}

/// The same dashboard as JSON
pub async fn dashboard_json(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, JsonError> {
    let params = query.resolve(&state.defaults, today());
    Ok(Json(load_dashboard(&state, &params).await?))
}

/// Schema of a backing table (debug routes only)
pub async fn describe_table(
    Path(table): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, JsonError> {
    Ok(Json(state.dashboard_service.describe_table(&table).await?))
}

/// Sample rows of a backing table (debug routes only)
pub async fn sample_table(
    Path(table): Path<String>,
    Query(query): Query<SampleQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, JsonError> {
    let limit = query.limit.unwrap_or(DEFAULT_SAMPLE_LIMIT);
    Ok(Json(state.dashboard_service.sample_data(&table, limit).await?))
}

pub async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn test_defaults_apply_when_query_is_empty() {
        let params = DashboardQuery::default().resolve(&DashboardSettings::default(), today());

        assert_eq!(params.user_id, 125);
        assert_eq!(params.window, DateWindow::trailing(today(), 30));
        assert!(params.show_chart);
        assert!(params.show_table);
    }

    #[test]
    fn test_query_overrides() {
        let query = DashboardQuery {
            user_id: Some("42".into()),
            days: Some("7".into()),
            show_chart: Some("false".into()),
            show_table: Some("ON".into()),
            uad_start_date: Some("2025-08-01".into()),
            uad_end_date: Some("2025-08-03".into()),
        };

        let params = query.resolve(&DashboardSettings::default(), today());

        assert_eq!(params.user_id, 42);
        assert_eq!(params.window.start.to_string(), "2025-08-01");
        assert_eq!(params.window.end.to_string(), "2025-08-03");
        assert!(!params.show_chart);
        assert!(params.show_table);
    }

    #[test]
    fn test_malformed_user_id_becomes_invalid() {
        let query = DashboardQuery {
            user_id: Some("abc".into()),
            days: Some("lots".into()),
            ..Default::default()
        };

        let params = query.resolve(&DashboardSettings::default(), today());

        assert_eq!(params.user_id, 0);
        assert_eq!(params.window, DateWindow::trailing(today(), 30));
    }
}
