use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::{Store, StorageError};

/// Keeps the saved value as serialized JSON in memory, so round-trips go
/// through the same serde path as the file store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T> Store<T> for MemoryStore
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Option<T>, StorageError> {
        let contents = self
            .contents
            .lock()
            .map_err(|e| StorageError::Memory(e.to_string()))?
            .clone();

        match contents {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string(value)?;
        *self.contents.lock().map_err(|e| StorageError::Memory(e.to_string()))? = Some(contents);
        Ok(())
    }
}
