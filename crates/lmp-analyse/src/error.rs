use lmp_core::LmpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyseError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("analysis failed: {0}")]
    Analysis(String),
}

pub type AnalyseResult<T> = Result<T, AnalyseError>;

impl From<LmpError> for AnalyseError {
    fn from(err: LmpError) -> Self {
        match err {
            LmpError::Io(e) => AnalyseError::Io(e),
            LmpError::Parse(msg) => AnalyseError::Parse(msg),
            LmpError::MarkerNotFound(msg) => AnalyseError::Parse(format!("missing {msg}")),
            LmpError::Unsupported(msg) => AnalyseError::Invalid(msg),
            LmpError::Mismatch(msg) => AnalyseError::Invalid(msg),
            LmpError::Invalid(msg) => AnalyseError::Invalid(msg),
            LmpError::InsufficientData(msg) => AnalyseError::Analysis(msg),
        }
    }
}
