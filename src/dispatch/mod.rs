/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Concurrent command dispatch.
//!
//! This module routes deferred commands through two independent FIFO queues
//! to two long-lived workers that apply them to one shared sequence.
//!
//! # Architecture
//!
//! - Commands are classified as writer (mutating) or reader (observing)
//! - Each class has its own [`TaskQueue`] and its own [`Worker`] task
//! - A worker executes one command at a time, in queue order
//! - Each execution produces an [`ExecutionEvent`] with a per-worker sequence
//!   number, rendered through a shared [`OutputSink`]
//! - Shutdown is cooperative: both queues drain before the workers exit
//!
//! # Examples
//!
//! ```no_run
//! use seqshell::dispatch::{Command, Dispatcher, MemorySink};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = Arc::new(MemorySink::new());
//! let dispatcher = Dispatcher::builder(sink.clone())
//!     .add_listener(|event| {
//!         println!("{} #{}: {:?}", event.role, event.sequence_num, event.outcome);
//!     })
//!     .spawn();
//!
//! dispatcher.submit(Command::Insert { pos: 0, value: 5 })?;
//! dispatcher.submit(Command::CountParity)?;
//!
//! dispatcher.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod dispatcher;
pub mod event;
pub mod outcome;
pub mod queue;
pub mod sink;
pub mod worker;

#[cfg(test)]
mod tests;

pub use command::{Command, parity_counts};
pub use dispatcher::{Dispatcher, DispatcherBuilder, ShutdownReport};
pub use event::ExecutionEvent;
pub use outcome::CommandOutcome;
pub use queue::{Dequeued, TaskQueue};
pub use sink::{JsonSink, MemorySink, OutputSink, TextSink};
pub use worker::{EventListener, Worker, WorkerHandle, WorkerRole, WorkerState, WorkerStats};
