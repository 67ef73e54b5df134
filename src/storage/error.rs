//! Error type for the link store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("URL must start with http:// or https:// (got {0:?})")]
    InvalidUrl(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("unsupported format {0:?}, use 'csv' or 'json'")]
    UnsupportedFormat(String),

    #[error("link not found: {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the backing medium rather than rejected input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            StoreError::Storage(_) | StoreError::Io(_) | StoreError::Csv(_) | StoreError::Json(_)
        )
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
