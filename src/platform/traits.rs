use async_trait::async_trait;

use super::{Difficulty, PlatformError, Submission};

/// Queries against the judge. `Ok(None)` means the judge answered but had
/// nothing for the request, `Err` means the query itself failed.
#[async_trait]
pub trait JudgeApi: Send + Sync {
    fn platform_name(&self) -> &str;

    async fn fetch_recent_submissions(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Option<Vec<Submission>>, PlatformError>;

    async fn fetch_difficulty(&self, title_slug: &str) -> Result<Option<Difficulty>, PlatformError>;
}
