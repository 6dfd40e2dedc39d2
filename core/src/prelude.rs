use serde::{Deserialize, Serialize};

/// One plotted point. Immutable once produced by a transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Common error type for chart-core operations.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("unsupported upload: {0}")]
    UnsupportedUpload(String),
    #[error("malformed upload: {0}")]
    MalformedUpload(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type ChartResult<T> = Result<T, ChartError>;
