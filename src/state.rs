use crate::{config::AppConfig, error::BotResult, runtime::RuntimeManager, service::ServiceRegistry};

/// Everything a handler needs, handed to the dispatcher as a dependency.
#[derive(Clone)]
pub struct AppState {
    pub service_registry: ServiceRegistry,
    pub runtime: RuntimeManager,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> BotResult<Self> {
        let service_registry = ServiceRegistry::new(config).await?;

        let runtime = RuntimeManager::new(
            config.runtime.queue_capacity,
            config.runtime.worker_concurrency,
            service_registry.stats.clone(),
        );

        runtime.start().await?;

        Ok(Self {
            service_registry,
            runtime,
        })
    }
}
