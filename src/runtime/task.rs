use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::service::{DaySummary, RegisteredUser, StatsError};

pub trait Task: Send + Sync + 'static {
    type Result: Send + 'static;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    /// Stats for the user who asked.
    Requester,
    /// Stats for every registered user.
    Everyone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    pub user_id: u64,
    pub chat_id: i64,
    pub scope: StatsScope,
}

pub struct TaskWithResult<T: Task> {
    pub task: T,
    pub result_tx: oneshot::Sender<T::Result>,
}

#[derive(Debug, Clone)]
pub struct StatsTask {
    pub id: String,
    pub targets: Vec<RegisteredUser>,
    pub context: TaskContext,
    pub created_at: DateTime<Utc>,
}

impl Task for StatsTask {
    type Result = StatsReport;
}

impl StatsTask {
    pub fn new(targets: Vec<RegisteredUser>, context: TaskContext) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            targets,
            context,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub struct StatsOutcome {
    pub user: RegisteredUser,
    pub result: Result<DaySummary, StatsError>,
}

/// One outcome per target, in target order.
#[derive(Debug)]
pub struct StatsReport {
    pub task_id: String,
    pub context: TaskContext,
    pub outcomes: Vec<StatsOutcome>,
}

impl StatsReport {
    pub fn successes(&self) -> impl Iterator<Item = (&RegisteredUser, &DaySummary)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().map(|summary| (&outcome.user, summary)))
    }
}
