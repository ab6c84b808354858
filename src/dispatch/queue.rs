/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Blocking FIFO task queue with cooperative shutdown.

use std::collections::VecDeque;
use std::pin::pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::trace;

/// What a consumer receives from [`TaskQueue::dequeue`].
#[derive(Debug, PartialEq, Eq)]
pub enum Dequeued<T> {
    /// The task at the head of the queue.
    Task(T),

    /// Shutdown was requested and nothing is left to drain.
    Shutdown,
}

#[derive(Debug)]
struct QueueState<T> {
    pending: VecDeque<T>,
    shutdown: bool,
}

/// Unbounded thread-safe FIFO queue.
///
/// Producers call [`enqueue`](Self::enqueue) from any thread without
/// awaiting. Consumers await [`dequeue`](Self::dequeue), which parks until a
/// task is available or shutdown is requested. Tasks queued before shutdown
/// are always handed out before the shutdown signal, so nothing is dropped.
///
/// # Examples
///
/// ```
/// use seqshell::{Dequeued, TaskQueue};
///
/// # async fn example() {
/// let queue = TaskQueue::new();
/// queue.enqueue("a").ok();
/// queue.enqueue("b").ok();
/// queue.request_shutdown();
///
/// assert_eq!(queue.dequeue().await, Dequeued::Task("a"));
/// assert_eq!(queue.dequeue().await, Dequeued::Task("b"));
/// assert_eq!(queue.dequeue().await, Dequeued::Shutdown);
/// # }
/// ```
#[derive(Debug)]
pub struct TaskQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Notify,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    /// Creates an empty, open queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                shutdown: false,
            }),
            available: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `task` to the tail and wakes one waiting consumer.
    ///
    /// # Errors
    ///
    /// Hands `task` back if shutdown has already been requested.
    pub fn enqueue(&self, task: T) -> Result<(), T> {
        {
            let mut state = self.lock();
            if state.shutdown {
                return Err(task);
            }
            state.pending.push_back(task);
            trace!(pending = state.pending.len(), "task enqueued");
        }
        self.available.notify_one();
        Ok(())
    }

    /// Removes and returns the head task, waiting while the queue is empty.
    ///
    /// Resolves to [`Dequeued::Shutdown`] only once shutdown has been
    /// requested and the queue is empty.
    pub async fn dequeue(&self) -> Dequeued<T> {
        loop {
            // Register interest before inspecting the state so a notification
            // sent between the check and the await is not lost.
            let mut notified = pin!(self.available.notified());
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(task) = state.pending.pop_front() {
                    return Dequeued::Task(task);
                }
                if state.shutdown {
                    return Dequeued::Shutdown;
                }
            }

            notified.await;
        }
    }

    /// Removes the head task without waiting.
    ///
    /// Returns `None` if the queue is empty and still open.
    pub fn try_dequeue(&self) -> Option<Dequeued<T>> {
        let mut state = self.lock();
        match state.pending.pop_front() {
            Some(task) => Some(Dequeued::Task(task)),
            None if state.shutdown => Some(Dequeued::Shutdown),
            None => None,
        }
    }

    /// Requests shutdown and wakes every waiting consumer. Idempotent.
    pub fn request_shutdown(&self) {
        {
            let mut state = self.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
            trace!(pending = state.pending.len(), "queue shutdown requested");
        }
        self.available.notify_waiters();
    }

    /// Returns `true` once shutdown has been requested.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    /// Number of tasks waiting to be dequeued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Returns `true` if no tasks are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }
}
