use super::leetcode::LeetCodeError;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),
    #[error("LeetCode error: {0}")]
    LeetCode(#[from] LeetCodeError),
}
