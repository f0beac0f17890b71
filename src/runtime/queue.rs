use std::sync::Arc;

use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot, Mutex,
};

use super::{task::Task, RuntimeError, TaskWithResult};

/// Bounded FIFO shared by all loops of a worker.
pub struct TaskQueue<T: Task> {
    sender: mpsc::Sender<TaskWithResult<T>>,
    receiver: Arc<Mutex<mpsc::Receiver<TaskWithResult<T>>>>,
}

impl<T: Task> Clone for TaskQueue<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: Arc::clone(&self.receiver),
        }
    }
}

impl<T: Task> TaskQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    pub fn push(&self, task: T) -> Result<oneshot::Receiver<T::Result>, RuntimeError> {
        let (result_tx, result_rx) = oneshot::channel();

        match self.sender.try_send(TaskWithResult { task, result_tx }) {
            Ok(()) => Ok(result_rx),
            Err(TrySendError::Full(_)) => Err(RuntimeError::QueueError("Queue is full".to_string())),
            Err(TrySendError::Closed(_)) => Err(RuntimeError::QueueError("Queue is closed".to_string())),
        }
    }

    pub async fn pop(&self) -> Option<TaskWithResult<T>> {
        self.receiver.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTask(u32);

    impl Task for EchoTask {
        type Result = u32;
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = TaskQueue::new(10);

        let _first = queue.push(EchoTask(1)).unwrap();
        let _second = queue.push(EchoTask(2)).unwrap();

        assert_eq!(queue.pop().await.unwrap().task.0, 1);
        assert_eq!(queue.pop().await.unwrap().task.0, 2);
    }

    #[tokio::test]
    async fn test_queue_capacity() {
        let queue = TaskQueue::new(2);

        assert!(queue.push(EchoTask(1)).is_ok());
        assert!(queue.push(EchoTask(2)).is_ok());

        assert!(matches!(queue.push(EchoTask(3)), Err(RuntimeError::QueueError(_))));
    }

    #[tokio::test]
    async fn test_result_reaches_submitter() {
        let queue = TaskQueue::new(1);
        let result_rx = queue.push(EchoTask(7)).unwrap();

        let item = queue.pop().await.unwrap();
        item.result_tx.send(item.task.0 * 6).unwrap();

        assert_eq!(result_rx.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_shared_between_clones() {
        let queue: TaskQueue<EchoTask> = TaskQueue::new(10);
        let consumer = queue.clone();

        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for _ in 0..3 {
                seen.push(consumer.pop().await.unwrap().task.0);
            }
            seen
        });

        for i in 0..3 {
            queue.push(EchoTask(i)).unwrap();
        }

        assert_eq!(handle.await.unwrap(), vec![0, 1, 2]);
    }
}
