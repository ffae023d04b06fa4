use abm_core::AbmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Abm(#[from] AbmError),
}

pub type SimResult<T> = Result<T, SimError>;
