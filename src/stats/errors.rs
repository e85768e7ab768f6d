use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Invalid score '{0}', expected format like 3-2")]
    InvalidScore(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
