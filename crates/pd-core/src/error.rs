use thiserror::Error;

use pd_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid kind filter: {0}")]
    Filter(#[from] ModelError),

    #[error("unknown match mode: {0}")]
    UnknownMatchMode(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
