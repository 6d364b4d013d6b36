use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    /// Navigation requested before any user position was reported.
    #[error("no known user position; navigation ignored")]
    NoUserPosition,
    #[error("duplicate location id '{0}' in catalog")]
    DuplicateLocationId(String),
    #[error("location '{0}' has a non-finite position")]
    NonFinitePosition(String),
    #[error("unknown location '{0}'")]
    UnknownLocation(String),
    #[error("invalid position '{0}', expected x,y,z")]
    InvalidPosition(String),
    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog download failed: {0}")]
    Fetch(String),
}

pub type NavResult<T> = Result<T, NavError>;
