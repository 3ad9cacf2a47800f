use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmpError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("marker not found: {0}")]
    MarkerNotFound(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("mismatch: {0}")]
    Mismatch(String),
    #[error("invalid: {0}")]
    Invalid(String),
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

pub type LmpResult<T> = Result<T, LmpError>;

impl LmpError {
    pub fn parse_at(line: usize, msg: impl std::fmt::Display) -> Self {
        LmpError::Parse(format!("line {line}: {msg}"))
    }
}
