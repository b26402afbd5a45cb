// Repository trait for activity data access
use crate::domain::activity::{DailyActivityRecord, LinkDayRecord};
use crate::domain::error::DashboardError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Daily totals and running balance for a user, oldest first
    async fn fetch_activity(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<DailyActivityRecord>, DashboardError>;

    /// One record per link per day
    async fn fetch_activity_by_link(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<LinkDayRecord>, DashboardError>;

    /// Schema of a backing table (debugging only)
    async fn describe_table(&self, table: &str) -> Result<Value, DashboardError>;

    /// A few sample rows of a backing table (debugging only)
    async fn sample_data(&self, table: &str, limit: i64) -> Result<Value, DashboardError>;
}
