use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("missing column: {column}")]
    MissingColumn { column: String },
    #[error("column {column} is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
    #[error("interpolation can only be {allowed}, got '{given}'")]
    InvalidInterpolation { given: String, allowed: String },
    #[error("table schema: {message}")]
    Schema { message: String },
}

impl StatsError {
    pub fn missing(column: &str) -> Self {
        StatsError::MissingColumn {
            column: column.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("result shape rejected by sink: {reason}")]
    ShapeMismatch { reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("scenario {scenario}: {source}")]
    Scenario {
        scenario: String,
        #[source]
        source: StatsError,
    },
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
