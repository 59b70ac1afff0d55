use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("chart construction failed for `{target_id}`: {reason}")]
    Construction { target_id: String, reason: String },

    #[error("invalid histogram range: low={low}, high={high}, width={width}")]
    InvalidHistogram { low: f64, high: f64, width: f64 },

    #[error("invalid histogram shape: {0}")]
    InvalidHistogramShape(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
