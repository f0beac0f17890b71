mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Whole-value persistence: `load` reads everything, `save` replaces everything.
#[async_trait]
pub trait Store<T>: Send + Sync + 'static
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<T>, StorageError>;
    async fn save(&self, value: &T) -> Result<(), StorageError>;
}
