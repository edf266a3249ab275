use thiserror::Error;

use crate::api::yahoo::ApiError;

/// Failures a session action can report to the output area
#[derive(Error, Debug)]
pub enum ChartError {
    /// Network, provider or empty-result failure while loading prices
    #[error("Error loading data: {0}")]
    Fetch(String),

    /// Missing or malformed user input
    #[error("{0}")]
    Validation(String),

    /// Thumbnail could not be fetched or decoded
    #[error("Error loading image: {0}")]
    Image(String),

    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl From<ApiError> for ChartError {
    fn from(err: ApiError) -> Self {
        ChartError::Fetch(err.to_string())
    }
}
