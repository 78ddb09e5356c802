use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown flag name: {0}")]
    UnknownFlag(String),
}

impl ModelError {
    /// Returns the token that failed to resolve to a flag.
    pub fn token(&self) -> &str {
        match self {
            ModelError::UnknownFlag(token) => token,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
