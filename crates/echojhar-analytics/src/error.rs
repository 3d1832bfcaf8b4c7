use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
