/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Core dispatcher.
//!
//! The [`Dispatcher`] owns the writer and reader queues, the two workers
//! consuming them, and a handle to the shared sequence both workers act on.
//! It is the only way commands enter the core.

use super::command::Command;
use super::event::ExecutionEvent;
use super::queue::TaskQueue;
use super::sink::OutputSink;
use super::worker::{EventListener, Worker, WorkerHandle, WorkerRole, WorkerStats};
use crate::error::DispatchError;
use crate::sequence::SharedSequence;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Counters of both workers after a completed shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShutdownReport {
    /// Writer worker counters.
    pub writer: WorkerStats,
    /// Reader worker counters.
    pub reader: WorkerStats,
}

/// Configures and spawns a [`Dispatcher`].
pub struct DispatcherBuilder {
    sequence: Arc<SharedSequence>,
    sink: Arc<dyn OutputSink>,
    listeners: Vec<EventListener>,
}

impl DispatcherBuilder {
    /// Uses `sequence` instead of a fresh empty one.
    #[must_use]
    pub fn with_sequence(mut self, sequence: Arc<SharedSequence>) -> Self {
        self.sequence = sequence;
        self
    }

    /// Registers a listener on both workers.
    ///
    /// It is called on the worker task after the sink, once per event.
    #[must_use]
    pub fn add_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Spawns both workers and returns the running dispatcher.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> Dispatcher {
        let writer_queue = Arc::new(TaskQueue::new());
        let reader_queue = Arc::new(TaskQueue::new());

        let spawn_worker = |role, queue: &Arc<TaskQueue<Command>>| {
            let mut worker = Worker::new(
                role,
                Arc::clone(queue),
                Arc::clone(&self.sequence),
                Arc::clone(&self.sink),
            );
            for listener in &self.listeners {
                worker.add_shared_listener(Arc::clone(listener));
            }
            worker.spawn()
        };

        let writer = spawn_worker(WorkerRole::Writer, &writer_queue);
        let reader = spawn_worker(WorkerRole::Reader, &reader_queue);
        info!("dispatcher started");

        Dispatcher {
            sequence: self.sequence,
            writer_queue,
            reader_queue,
            writer,
            reader,
        }
    }
}

/// Routes commands to the writer and reader workers.
///
/// Commands submitted to one queue run in submission order. There is no
/// ordering between the two queues: a `read` may observe the sequence
/// before or after a concurrently queued `insert`.
///
/// # Examples
///
/// ```no_run
/// use seqshell::{Command, Dispatcher, TextSink};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::builder(Arc::new(TextSink::stdout())).spawn();
/// dispatcher.submit_writer(Command::Insert { pos: 0, value: 1 })?;
/// dispatcher.submit_reader(Command::Read)?;
/// dispatcher.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher {
    sequence: Arc<SharedSequence>,
    writer_queue: Arc<TaskQueue<Command>>,
    reader_queue: Arc<TaskQueue<Command>>,
    writer: WorkerHandle,
    reader: WorkerHandle,
}

impl Dispatcher {
    /// Starts configuring a dispatcher that reports through `sink`.
    #[must_use]
    pub fn builder(sink: Arc<dyn OutputSink>) -> DispatcherBuilder {
        DispatcherBuilder {
            sequence: Arc::new(SharedSequence::new()),
            sink,
            listeners: Vec::new(),
        }
    }

    /// Queues a mutating command for the writer worker.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::WrongClass`] for a reader command and
    /// [`DispatchError::ShutDown`] once shutdown has been requested.
    pub fn submit_writer(&self, command: Command) -> Result<(), DispatchError> {
        self.enqueue(WorkerRole::Writer, &self.writer_queue, command)
    }

    /// Queues an observing command for the reader worker.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::WrongClass`] for a writer command and
    /// [`DispatchError::ShutDown`] once shutdown has been requested.
    pub fn submit_reader(&self, command: Command) -> Result<(), DispatchError> {
        self.enqueue(WorkerRole::Reader, &self.reader_queue, command)
    }

    /// Queues `command` on the queue matching its class.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ShutDown`] once shutdown has been requested.
    pub fn submit(&self, command: Command) -> Result<(), DispatchError> {
        match command.class() {
            WorkerRole::Writer => self.submit_writer(command),
            WorkerRole::Reader => self.submit_reader(command),
        }
    }

    fn enqueue(
        &self,
        role: WorkerRole,
        queue: &TaskQueue<Command>,
        command: Command,
    ) -> Result<(), DispatchError> {
        if command.class() != role {
            return Err(DispatchError::WrongClass {
                command: command.name(),
                expected: role,
            });
        }
        queue.enqueue(command).map_err(|_| DispatchError::ShutDown)?;
        debug!(%role, ?command, "command submitted");
        Ok(())
    }

    /// Returns the sequence both workers act on.
    #[must_use]
    pub fn sequence(&self) -> &Arc<SharedSequence> {
        &self.sequence
    }

    /// Number of commands waiting in the queue for `role`.
    #[must_use]
    pub fn pending(&self, role: WorkerRole) -> usize {
        match role {
            WorkerRole::Writer => self.writer_queue.len(),
            WorkerRole::Reader => self.reader_queue.len(),
        }
    }

    /// Returns the handle of the worker for `role`.
    #[must_use]
    pub fn worker(&self, role: WorkerRole) -> &WorkerHandle {
        match role {
            WorkerRole::Writer => &self.writer,
            WorkerRole::Reader => &self.reader,
        }
    }

    /// Requests shutdown on both queues and waits for both workers.
    ///
    /// Commands already queued are executed before the workers exit.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::WorkerJoin`] if a worker task panicked or
    /// was cancelled.
    pub async fn shutdown(self) -> Result<ShutdownReport, DispatchError> {
        info!(
            pending_writes = self.writer_queue.len(),
            pending_reads = self.reader_queue.len(),
            "dispatcher shutting down"
        );
        self.writer_queue.request_shutdown();
        self.reader_queue.request_shutdown();

        let writer = self
            .writer
            .wait()
            .await
            .map_err(|source| DispatchError::WorkerJoin {
                role: WorkerRole::Writer,
                source,
            })?;
        let reader = self
            .reader
            .wait()
            .await
            .map_err(|source| DispatchError::WorkerJoin {
                role: WorkerRole::Reader,
                source,
            })?;

        Ok(ShutdownReport { writer, reader })
    }
}
