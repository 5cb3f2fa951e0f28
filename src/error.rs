use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdherenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid treatment: {0}")]
    InvalidTreatment(String),

    #[error("Cannot draw from empty {0} pool")]
    EmptyPool(String),
}

pub type AdherenceResult<T> = Result<T, AdherenceError>;
