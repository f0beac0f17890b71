use shuttle_runtime::Error as ShuttleError;

use crate::config::ConfigError;
use crate::runtime::RuntimeError;
use crate::service::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Runtime error: {0}")]
    RuntimeError(#[from] RuntimeError),

    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<BotError> for ShuttleError {
    fn from(error: BotError) -> Self {
        ShuttleError::Custom(anyhow::anyhow!(error))
    }
}

impl From<ConfigError> for ShuttleError {
    fn from(error: ConfigError) -> Self {
        BotError::from(error).into()
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::Other(error)
    }
}

pub type HandlerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub type BotResult<T> = Result<T, BotError>;
