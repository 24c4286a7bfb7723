use anyhow::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to parse CSV data: {0}")]
    Parse(String),
    #[error("no collection data has been loaded")]
    NoData,
    #[error("image lookup failed: {0}")]
    Resolve(String),
    #[error(transparent)]
    Other(#[from] Error),
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
