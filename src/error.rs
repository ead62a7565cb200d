use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    /// Input was interrupted (EOF / Ctrl-D) while waiting for an answer.
    #[error("Session aborted by user")]
    Aborted,
}

pub type CpResult<T> = Result<T, CareerError>;
