use std::sync::Arc;

use crate::{config::AppConfig, platform::LeetCodeClient, storage::JsonFileStore};

pub mod digest;
mod error;
pub mod registry;
pub mod stats;
pub mod timezone;

pub use digest::{create_formatter, DigestFormatter, DigestStyle, RenderedMessage};
pub use error::ServiceError;
pub use registry::{RegisteredUser, RegistryError, RegistryMap, UserRegistry};
pub use stats::{DaySummary, StatsError, StatsService};

#[derive(Clone)]
pub struct ServiceRegistry {
    pub registry: Arc<UserRegistry>,
    pub stats: StatsService,
    pub formatter: Arc<dyn DigestFormatter>,
}

impl ServiceRegistry {
    pub async fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        info!("Initializing service registry");

        let judge = LeetCodeClient::new(&config.judge).map_err(crate::platform::PlatformError::from)?;
        let stats = StatsService::new(Arc::new(judge), config.judge.recent_limit);

        let store = JsonFileStore::<RegistryMap>::new(config.registry.file_path.clone());
        info!("Loading user registry from {}", store.path().display());
        let registry = UserRegistry::new(Box::new(store));
        registry.load().await?;

        let formatter = create_formatter(config.digest.style, config.judge.problem_base_url.clone());

        info!("Service registry initialized");

        Ok(Self {
            registry: Arc::new(registry),
            stats,
            formatter: Arc::from(formatter),
        })
    }
}
