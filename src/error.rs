use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Structural problems with the equation text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty equation")]
    Empty,
    #[error("missing dx/dy marker")]
    MissingMarker,
    #[error("equation does not match M dx + N dy shape")]
    Shape,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("cannot parse expression: {0}")]
    Parse(String),
}

impl AnalysisError {
    pub fn is_format(&self) -> bool {
        matches!(self, AnalysisError::Format(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, AnalysisError::Parse(_))
    }
}
