use std::{io::ErrorKind, marker::PhantomData, path::PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::{Store, StorageError};

/// A single JSON document on local disk. Writes overwrite the file in place,
/// last write wins.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl<T> Store<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Option<T>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    async fn save(&self, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string(value)?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
