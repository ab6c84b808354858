/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Output sinks.
//!
//! Both workers write through one shared sink. Each [`OutputSink::emit`]
//! call writes every line of one event as a single block, so the two-line
//! parity report can never be split by the other worker.

use super::event::ExecutionEvent;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Destination for rendered execution events.
pub trait OutputSink: Send + Sync {
    /// Writes `event` atomically with respect to other calls.
    fn emit(&self, event: &ExecutionEvent);
}

fn lock<W>(writer: &Mutex<W>) -> MutexGuard<'_, W> {
    writer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes human-readable lines.
#[derive(Debug)]
pub struct TextSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl TextSink<Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TextSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> OutputSink for TextSink<W> {
    fn emit(&self, event: &ExecutionEvent) {
        let mut block = event.lines().join("\n");
        block.push('\n');

        let mut writer = lock(&self.writer);
        if let Err(e) = writer
            .write_all(block.as_bytes())
            .and_then(|()| writer.flush())
        {
            warn!(error = %e, sequence_num = event.sequence_num, "failed to write output");
        }
    }
}

/// Writes one JSON object per event, one per line.
#[derive(Debug)]
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl JsonSink<Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> OutputSink for JsonSink<W> {
    fn emit(&self, event: &ExecutionEvent) {
        let mut line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, sequence_num = event.sequence_num, "failed to encode event");
                return;
            }
        };
        line.push('\n');

        let mut writer = lock(&self.writer);
        if let Err(e) = writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush())
        {
            warn!(error = %e, sequence_num = event.sequence_num, "failed to write output");
        }
    }
}

/// Collects rendered lines in memory.
///
/// # Examples
///
/// ```
/// use seqshell::{Command, CommandOutcome, ExecutionEvent, MemorySink, OutputSink, WorkerRole};
///
/// let sink = MemorySink::new();
/// sink.emit(&ExecutionEvent::new(
///     1,
///     0,
///     WorkerRole::Reader,
///     Command::CountParity,
///     CommandOutcome::ParityCount { even: 2, odd: 1 },
/// ));
/// assert_eq!(sink.lines(), vec!["Even positions: 2", "Odd positions: 1"]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line emitted so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    /// Removes and returns every line emitted so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.lines))
    }
}

impl OutputSink for MemorySink {
    fn emit(&self, event: &ExecutionEvent) {
        lock(&self.lines).extend(event.lines());
    }
}
