// Error taxonomy shared by the client, the service and the handlers
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Bad input, rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The API answered with `success: false`; shown as the API's own message.
    #[error("{0}")]
    Api(String),

    /// Network, timeout, HTTP status or JSON decode failure.
    #[error("API Error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn transport_msg(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// True for failures that came from talking to the API rather than from bad input.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

pub fn ensure_positive_user_id(user_id: i64) -> Result<(), DashboardError> {
    if user_id <= 0 {
        return Err(DashboardError::validation("User ID must be a positive integer"));
    }
    Ok(())
}

pub fn ensure_table_name(table: &str) -> Result<(), DashboardError> {
    if table.trim().is_empty() {
        return Err(DashboardError::validation("Table name cannot be empty"));
    }
    Ok(())
}

pub fn ensure_positive_limit(limit: i64) -> Result<(), DashboardError> {
    if limit < 1 {
        return Err(DashboardError::validation("Limit must be a positive integer"));
    }
    Ok(())
}
