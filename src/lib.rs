/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # seqshell
//!
//! An interactive command shell over a shared, in-memory sequence of integers.
//!
//! Commands fall into two disjoint classes. Writer commands (`insert`, `remove`,
//! `sort`, `reverse`) mutate the sequence; reader commands (`read`, `count`)
//! observe it. Each class is fed through its own FIFO [`TaskQueue`] to a
//! dedicated long-lived [`Worker`], so the input loop never blocks on the
//! sequence itself.
//!
//! ## Components
//!
//! - [`SharedSequence`]: mutex-guarded ordered collection of `i64`.
//! - [`Command`]: one deferred operation, executed by pattern match.
//! - [`TaskQueue`]: blocking FIFO with cooperative shutdown.
//! - [`Worker`]: drains one queue against the shared sequence.
//! - [`Dispatcher`]: wires the two queues and workers together.
//! - [`shell`]: line parser and run loop feeding the dispatcher.
//!
//! ## Example
//!
//! ```no_run
//! use seqshell::{Command, Dispatcher, MemorySink};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = Arc::new(MemorySink::new());
//! let dispatcher = Dispatcher::builder(sink.clone()).spawn();
//!
//! dispatcher.submit(Command::Insert { pos: 0, value: 5 })?;
//! dispatcher.submit(Command::Read)?;
//!
//! let report = dispatcher.shutdown().await?;
//! assert_eq!(report.writer.executed, 1);
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod error;
pub mod sequence;
pub mod shell;

pub use dispatch::{
    Command, CommandOutcome, Dequeued, Dispatcher, DispatcherBuilder, ExecutionEvent, JsonSink,
    MemorySink, OutputSink, ShutdownReport, TaskQueue, TextSink, Worker, WorkerHandle,
    WorkerRole, WorkerState, WorkerStats,
};
pub use error::{DispatchError, ParseError, SequenceError, ShellError};
pub use sequence::{SharedSequence, SortOrder};
