use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0} must be fitted before use")]
    NotFitted(&'static str),
    #[error("input shape mismatch for {what}: expected {expected}, got {actual}")]
    InputShape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl PipelineError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
