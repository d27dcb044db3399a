use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimerError {
    /// A host surface was not supplied before the timer was started.
    #[error("missing {0} target")]
    MissingTarget(&'static str),
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config format error: {0}")]
    Json(#[from] serde_json::Error),
}
