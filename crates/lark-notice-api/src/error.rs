use thiserror::Error;

/// Notice error types
#[derive(Error, Debug)]
pub enum NoticeError {
    #[error("Robot type not supported: {0}")]
    RobotNotSupported(String),

    #[error("Unknown build status: {0}")]
    UnknownStatus(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type NoticeResult<T> = Result<T, NoticeError>;

impl From<serde_json::Error> for NoticeError {
    fn from(err: serde_json::Error) -> Self {
        NoticeError::SerializationError(err.to_string())
    }
}
