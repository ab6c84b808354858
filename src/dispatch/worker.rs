/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Long-lived queue consumers.
//!
//! A [`Worker`] owns the consuming end of one [`TaskQueue`] and applies each
//! dequeued [`Command`] to the shared sequence, one at a time, in queue
//! order. A rejected command is reported through the sink like any other
//! result and the worker carries on; it is never retried.

use super::command::Command;
use super::event::ExecutionEvent;
use super::queue::{Dequeued, TaskQueue};
use super::sink::OutputSink;
use crate::sequence::SharedSequence;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Type alias for event listener functions.
pub type EventListener = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;

/// The class of commands a worker consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerRole {
    /// Applies mutating commands.
    Writer,
    /// Applies observing commands.
    Reader,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Writer => write!(f, "writer"),
            Self::Reader => write!(f, "reader"),
        }
    }
}

/// Lifecycle of a worker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    /// Waiting on or executing from an open queue.
    Running = 0,
    /// Shutdown requested; executing what is left in the queue.
    Draining = 1,
    /// Queue drained after shutdown; the task has exited.
    Terminated = 2,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Running,
            1 => Self::Draining,
            _ => Self::Terminated,
        }
    }
}

/// Counters reported by a worker when it terminates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    /// Commands executed, including rejected ones.
    pub executed: u64,
    /// Commands whose outcome was a rejection.
    pub rejected: u64,
}

/// Consumer bound to one queue and the shared sequence.
pub struct Worker {
    role: WorkerRole,
    queue: Arc<TaskQueue<Command>>,
    sequence: Arc<SharedSequence>,
    sink: Arc<dyn OutputSink>,
    listeners: Vec<EventListener>,
    next_sequence: u64,
    stats: WorkerStats,
    state: Arc<AtomicU8>,
}

impl Worker {
    /// Creates a worker that will drain `queue` into `sequence`.
    #[must_use]
    pub fn new(
        role: WorkerRole,
        queue: Arc<TaskQueue<Command>>,
        sequence: Arc<SharedSequence>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            role,
            queue,
            sequence,
            sink,
            listeners: Vec::new(),
            next_sequence: 1,
            stats: WorkerStats::default(),
            state: Arc::new(AtomicU8::new(WorkerState::Running as u8)),
        }
    }

    /// Registers an event listener.
    ///
    /// Listeners run synchronously on the worker task, after the sink, in
    /// sequence order.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    pub(crate) fn add_shared_listener(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Spawns the worker loop on a new task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn spawn(mut self) -> WorkerHandle {
        let role = self.role;
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move { self.run_loop().await });

        WorkerHandle {
            role,
            handle,
            state,
        }
    }

    /// Waits on the queue and executes until shutdown is signalled.
    async fn run_loop(&mut self) -> WorkerStats {
        debug!(role = %self.role, "worker started");

        loop {
            match self.queue.dequeue().await {
                Dequeued::Task(command) => {
                    if self.queue.is_shutdown() {
                        self.set_state(WorkerState::Draining);
                    }
                    self.execute(command);
                }
                Dequeued::Shutdown => break,
            }
        }

        self.set_state(WorkerState::Terminated);
        info!(
            role = %self.role,
            executed = self.stats.executed,
            rejected = self.stats.rejected,
            "worker terminated"
        );
        self.stats
    }

    /// Executes one command and reports the event.
    fn execute(&mut self, command: Command) {
        let seq = self.next_sequence;
        self.next_sequence += 1;

        let outcome = command.execute(&self.sequence);
        self.stats.executed += 1;
        if outcome.is_rejected() {
            self.stats.rejected += 1;
            warn!(role = %self.role, sequence_num = seq, ?command, "command rejected");
        } else {
            debug!(role = %self.role, sequence_num = seq, ?command, "command executed");
        }

        let event = ExecutionEvent::new(seq, nanos_since_epoch(), self.role, command, outcome);
        self.sink.emit(&event);
        for listener in &self.listeners {
            listener(&event);
        }
    }

    fn set_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Handle to a spawned worker task.
#[derive(Debug)]
pub struct WorkerHandle {
    role: WorkerRole,
    handle: JoinHandle<WorkerStats>,
    state: Arc<AtomicU8>,
}

impl WorkerHandle {
    /// Role of the worker.
    #[must_use]
    pub fn role(&self) -> WorkerRole {
        self.role
    }

    /// Current lifecycle state of the worker.
    #[must_use]
    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Waits for the worker to terminate and returns its counters.
    ///
    /// The worker only terminates after its queue's shutdown was requested
    /// and every queued command has run.
    pub async fn wait(self) -> Result<WorkerStats, tokio::task::JoinError> {
        self.handle.await
    }
}

/// Returns the current time in nanoseconds since the Unix epoch.
#[inline]
fn nanos_since_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
