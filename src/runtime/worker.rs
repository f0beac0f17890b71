use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::service::StatsService;

use super::{queue::TaskQueue, RuntimeError, StatsOutcome, StatsReport, StatsTask};

#[async_trait]
pub trait Worker: Send + Sync + 'static {
    fn name(&self) -> &str;
    async fn start(&self) -> Result<(), RuntimeError>;
    async fn stop(&self) -> Result<(), RuntimeError>;
    #[allow(dead_code)]
    fn is_running(&self) -> bool;
}

/// Pulls stats tasks off the queue and aggregates each target in turn.
#[derive(Clone)]
pub struct StatsWorker {
    name: String,
    concurrency: usize,
    queue: TaskQueue<StatsTask>,
    stats: StatsService,
    shutdown: broadcast::Sender<()>,
    running: Arc<AtomicBool>,
}

impl StatsWorker {
    pub fn new(name: &str, concurrency: usize, queue: TaskQueue<StatsTask>, stats: StatsService) -> Self {
        let (shutdown, _) = broadcast::channel(1);
        Self {
            name: name.to_string(),
            concurrency: concurrency.max(1),
            queue,
            stats,
            shutdown,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn process_task(&self, task: StatsTask) -> StatsReport {
        info!(
            "Processing stats task {} for {} users, requested by {} (queued at {})",
            task.id,
            task.targets.len(),
            task.context.user_id,
            task.created_at
        );

        let mut outcomes = Vec::with_capacity(task.targets.len());
        for user in task.targets {
            let result = self
                .stats
                .aggregate(&user.registration.handle, user.registration.timezone)
                .await;

            if let Err(e) = &result {
                error!(
                    "Stats for user {} ({} in {}) failed: {}",
                    user.user_id, user.registration.handle, user.registration.timezone, e
                );
            }

            outcomes.push(StatsOutcome { user, result });
        }

        StatsReport {
            task_id: task.id,
            context: task.context,
            outcomes,
        }
    }
}

#[async_trait]
impl Worker for StatsWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&self) -> Result<(), RuntimeError> {
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }

        self.running.store(true, Ordering::SeqCst);
        let worker_ref = Arc::new(self.clone());

        for i in 0..self.concurrency {
            let worker_name = format!("{}_{}", self.name, i);
            let running = self.running.clone();
            let worker = worker_ref.clone();
            let mut rx = self.shutdown.subscribe();

            tokio::spawn(async move {
                while running.load(Ordering::SeqCst) {
                    tokio::select! {
                        task = worker.queue.pop() => {
                            let Some(task_with_result) = task else {
                                break;
                            };

                            let report = worker.process_task(task_with_result.task).await;

                            if task_with_result.result_tx.send(report).is_err() {
                                warn!("Worker {}: stats report dropped, receiver is gone", worker_name);
                            }
                        }
                        _ = rx.recv() => {
                            break;
                        }
                    }
                }
                debug!("Worker {} stopped", worker_name);
            });
        }

        Ok(())
    }

    async fn stop(&self) -> Result<(), RuntimeError> {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.shutdown.send(());
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
