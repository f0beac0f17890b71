mod model;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub use model::*;

use crate::platform::{JudgeApi, PlatformError};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Judge query failed for {handle}: {source}")]
    JudgeQueryFailed {
        handle: String,
        #[source]
        source: PlatformError,
    },
}

#[derive(Clone)]
pub struct StatsService {
    judge: Arc<dyn JudgeApi>,
    recent_limit: usize,
}

impl StatsService {
    pub fn new(judge: Arc<dyn JudgeApi>, recent_limit: usize) -> Self {
        info!("Initializing StatsService with {}", judge.platform_name());
        Self { judge, recent_limit }
    }

    pub async fn aggregate(&self, handle: &str, timezone: Tz) -> Result<DaySummary, StatsError> {
        self.aggregate_at(handle, timezone, Utc::now()).await
    }

    pub async fn aggregate_at(&self, handle: &str, timezone: Tz, now: DateTime<Utc>) -> Result<DaySummary, StatsError> {
        info!("Aggregating stats for {} in {}", handle, timezone);

        let submissions = self
            .judge
            .fetch_recent_submissions(handle, self.recent_limit)
            .await
            .map_err(|source| StatsError::JudgeQueryFailed {
                handle: handle.to_string(),
                source,
            })?
            .unwrap_or_default();

        let mut summary = DaySummary::empty(now.with_timezone(&timezone).date_naive());
        let window_start = summary.window_start();

        for submission in submissions {
            let Some(submitted_at) = timezone.timestamp_opt(submission.timestamp, 0).single() else {
                warn!(
                    "Skipping {} for {}: timestamp {} out of range",
                    submission.title_slug, handle, submission.timestamp
                );
                continue;
            };
            let date = submitted_at.date_naive();

            if date < window_start {
                continue;
            }

            let Some(bucket) = summary.bucket_for(date) else {
                error!(
                    "Submission {} for {} dated {} falls after today ({}) in {}",
                    submission.title_slug, handle, date, summary.today_date, timezone
                );
                continue;
            };

            let difficulty = match self.judge.fetch_difficulty(&submission.title_slug).await {
                Ok(Some(difficulty)) => difficulty,
                Ok(None) => {
                    warn!("No difficulty for {}, dropping it from {}'s stats", submission.title_slug, handle);
                    continue;
                }
                Err(e) => {
                    warn!(
                        "Difficulty lookup failed for {}, dropping it from {}'s stats: {}",
                        submission.title_slug, handle, e
                    );
                    continue;
                }
            };

            debug!("{} for {} goes to {}", submission.title_slug, handle, bucket);
            summary.push(
                bucket,
                EnrichedEntry {
                    title: submission.title,
                    title_slug: submission.title_slug,
                    difficulty,
                    date,
                },
            );
        }

        info!(
            "Processed stats for {}: {} kept (today={}, yesterday={}, two_days_ago={})",
            handle,
            summary.total(),
            summary.today.len(),
            summary.yesterday.len(),
            summary.two_days_ago.len()
        );

        Ok(summary)
    }
}
