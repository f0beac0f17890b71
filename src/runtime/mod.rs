mod queue;
mod task;
mod worker;

use tokio::sync::oneshot;

pub use queue::TaskQueue;
pub use task::*;
pub use worker::{StatsWorker, Worker};

use crate::service::StatsService;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("queue error: {0}")]
    QueueError(String),
    #[error("recv error: {0}")]
    RecvError(String),
}

#[derive(Clone)]
pub struct RuntimeManager {
    queue: TaskQueue<StatsTask>,
    worker: StatsWorker,
}

impl RuntimeManager {
    pub fn new(queue_capacity: usize, worker_concurrency: usize, stats: StatsService) -> Self {
        info!(
            "Initializing runtime with queue capacity {} and {} stats workers",
            queue_capacity, worker_concurrency
        );
        let queue = TaskQueue::new(queue_capacity);
        let worker = StatsWorker::new("stats", worker_concurrency, queue.clone(), stats);

        Self { queue, worker }
    }

    pub async fn start(&self) -> Result<(), RuntimeError> {
        self.worker.start().await?;
        info!("Worker {} started", self.worker.name());
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), RuntimeError> {
        self.worker.stop().await
    }

    /// Queues the task and hands back the receiving end of its report.
    pub fn submit(&self, task: StatsTask) -> Result<oneshot::Receiver<StatsReport>, RuntimeError> {
        info!("Submitting stats task {} with {} targets", task.id, task.targets.len());
        self.queue.push(task)
    }
}
