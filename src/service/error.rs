use crate::platform::PlatformError;

use super::registry::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}
