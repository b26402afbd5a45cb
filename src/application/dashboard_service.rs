// Dashboard service - Use case for building a user's activity dashboard
use crate::application::activity_repository::ActivityRepository;
use crate::application::aggregator::{
    aggregate_links_by_date, aggregate_links_overall, build_view_model,
};
use crate::domain::dashboard::{Dashboard, DateWindow};
use crate::domain::error::{
    DashboardError, ensure_positive_limit, ensure_positive_user_id, ensure_table_name,
};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ActivityRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_dashboard(
        &self,
        user_id: i64,
        window: DateWindow,
    ) -> Result<Dashboard, DashboardError> {
        ensure_positive_user_id(user_id)?;

        // Link data first: the daily rows are decorated with each day's top links
        let link_records = self
            .repository
            .fetch_activity_by_link(user_id, Some(window.start), Some(window.end))
            .await?;
        let daily = self
            .repository
            .fetch_activity(user_id, Some(window.start), Some(window.end))
            .await?;

        tracing::debug!(
            user_id,
            days = daily.len(),
            link_records = link_records.len(),
            "Fetched activity"
        );

        let overall = aggregate_links_overall(&link_records);
        let by_date = aggregate_links_by_date(&link_records);
        let view = build_view_model(daily, &by_date, overall);

        Ok(Dashboard::new(user_id, window, view))
    }

    pub async fn describe_table(&self, table: &str) -> Result<Value, DashboardError> {
        ensure_table_name(table)?;
        self.repository.describe_table(table).await
    }

    pub async fn sample_data(&self, table: &str, limit: i64) -> Result<Value, DashboardError> {
        ensure_table_name(table)?;
        ensure_positive_limit(limit)?;
        self.repository.sample_data(table, limit).await
    }
}
