use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Memory error: {0}")]
    Memory(String),
}
