// HTTP client for the User Activity Summary API
use crate::application::activity_repository::ActivityRepository;
use crate::domain::activity::{DailyActivityRecord, LinkDayRecord};
use crate::domain::error::{
    DashboardError, ensure_positive_limit, ensure_positive_user_id, ensure_table_name,
};
use crate::infrastructure::config::ApiSettings;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ActivityApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Every endpoint wraps its payload in the same envelope.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    message: String,
    success: Option<bool>,
    source: Option<T>,
}

impl<T> ApiEnvelope<T> {
    fn message_or_default(self) -> String {
        if self.message.trim().is_empty() {
            "The activity API reported an error".to_string()
        } else {
            self.message
        }
    }

    fn into_source(self) -> Result<Option<T>, DashboardError> {
        if self.success == Some(false) {
            return Err(DashboardError::Api(self.message_or_default()));
        }
        Ok(self.source)
    }
}

impl ActivityApiClient {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn date_query(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = start_date {
            query.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        query
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, DashboardError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, ?query, "Requesting activity API");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::transport(format!("API request failed: {e}"), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::transport(format!("API request failed: {e}"), e))?;

        if !status.is_success() {
            // Error responses usually still carry the envelope's message
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<Value>>(&body) {
                if envelope.success == Some(false) && !envelope.message.is_empty() {
                    return Err(DashboardError::Api(envelope.message));
                }
            }
            return Err(DashboardError::transport_msg(format!(
                "API request failed with status {status}"
            )));
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            DashboardError::transport(format!("Failed to decode JSON response: {e}"), e)
        })?;

        envelope.into_source()
    }
}

#[async_trait]
impl ActivityRepository for ActivityApiClient {
    async fn fetch_activity(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<DailyActivityRecord>, DashboardError> {
        ensure_positive_user_id(user_id)?;
        let path = format!("user-activity-summary/{user_id}");
        let records = self
            .get::<Vec<DailyActivityRecord>>(&path, &Self::date_query(start_date, end_date))
            .await?;
        Ok(records.unwrap_or_default())
    }

    async fn fetch_activity_by_link(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<LinkDayRecord>, DashboardError> {
        ensure_positive_user_id(user_id)?;
        let path = format!("user-activity-by-link/{user_id}");
        let records = self
            .get::<Vec<LinkDayRecord>>(&path, &Self::date_query(start_date, end_date))
            .await?;
        Ok(records.unwrap_or_default())
    }

    async fn describe_table(&self, table: &str) -> Result<Value, DashboardError> {
        ensure_table_name(table)?;
        let path = format!("schema-inspector/describe/{}", urlencoding::encode(table));
        Ok(self.get::<Value>(&path, &[]).await?.unwrap_or_default())
    }

    async fn sample_data(&self, table: &str, limit: i64) -> Result<Value, DashboardError> {
        ensure_table_name(table)?;
        ensure_positive_limit(limit)?;
        let path = format!("schema-inspector/sample/{}", urlencoding::encode(table));
        let query = [("limit", limit.to_string())];
        Ok(self.get::<Value>(&path, &query).await?.unwrap_or_default())
    }
}
