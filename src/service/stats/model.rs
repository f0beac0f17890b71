use std::fmt::{self, Display};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::platform::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DayBucket {
    Today,
    Yesterday,
    TwoDaysAgo,
}

impl DayBucket {
    /// Display order, most recent first.
    pub const ALL: [DayBucket; 3] = [DayBucket::Today, DayBucket::Yesterday, DayBucket::TwoDaysAgo];

    pub fn days_back(&self) -> u64 {
        match self {
            DayBucket::Today => 0,
            DayBucket::Yesterday => 1,
            DayBucket::TwoDaysAgo => 2,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            DayBucket::Today => "digest.bucket.today",
            DayBucket::Yesterday => "digest.bucket.yesterday",
            DayBucket::TwoDaysAgo => "digest.bucket.two_days_ago",
        }
    }
}

impl Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBucket::Today => write!(f, "today"),
            DayBucket::Yesterday => write!(f, "yesterday"),
            DayBucket::TwoDaysAgo => write!(f, "two_days_ago"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedEntry {
    pub title: String,
    pub title_slug: String,
    pub difficulty: Difficulty,
    pub date: NaiveDate,
}

/// Solved problems grouped by day, relative to `today` in the requester's
/// timezone. All three buckets always exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySummary {
    pub today_date: NaiveDate,
    pub today: Vec<EnrichedEntry>,
    pub yesterday: Vec<EnrichedEntry>,
    pub two_days_ago: Vec<EnrichedEntry>,
}

impl DaySummary {
    pub fn empty(today_date: NaiveDate) -> Self {
        Self {
            today_date,
            today: Vec::new(),
            yesterday: Vec::new(),
            two_days_ago: Vec::new(),
        }
    }

    pub fn date_of(&self, bucket: DayBucket) -> NaiveDate {
        self.today_date
            .checked_sub_days(Days::new(bucket.days_back()))
            .unwrap_or(self.today_date)
    }

    /// Oldest date still inside the window.
    pub fn window_start(&self) -> NaiveDate {
        self.date_of(DayBucket::TwoDaysAgo)
    }

    pub fn bucket_for(&self, date: NaiveDate) -> Option<DayBucket> {
        DayBucket::ALL.into_iter().find(|bucket| self.date_of(*bucket) == date)
    }

    pub fn entries(&self, bucket: DayBucket) -> &[EnrichedEntry] {
        match bucket {
            DayBucket::Today => &self.today,
            DayBucket::Yesterday => &self.yesterday,
            DayBucket::TwoDaysAgo => &self.two_days_ago,
        }
    }

    pub fn push(&mut self, bucket: DayBucket, entry: EnrichedEntry) {
        match bucket {
            DayBucket::Today => self.today.push(entry),
            DayBucket::Yesterday => self.yesterday.push(entry),
            DayBucket::TwoDaysAgo => self.two_days_ago.push(entry),
        }
    }

    pub fn total(&self) -> usize {
        self.today.len() + self.yesterday.len() + self.two_days_ago.len()
    }
}
