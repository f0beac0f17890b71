#[derive(Debug, thiserror::Error)]
pub enum LeetCodeError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Failed to decode response: {0}")]
    DeserializationError(String),
    #[error("Query error: {0}")]
    QueryError(String),
}
