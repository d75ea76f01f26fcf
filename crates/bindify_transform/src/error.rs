/// Errors of the transform itself. Markup problems never surface here:
/// the tree builder recovers from them on its own.
#[derive(Debug)]
pub enum TransformError {
    /// A delimiter pair produced an unusable pattern.
    InvalidPattern(regex::Error),
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::InvalidPattern(err) => {
                write!(f, "invalid delimiter pattern: {}", err)
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::InvalidPattern(err) => Some(err),
        }
    }
}

impl From<regex::Error> for TransformError {
    fn from(err: regex::Error) -> Self {
        TransformError::InvalidPattern(err)
    }
}
