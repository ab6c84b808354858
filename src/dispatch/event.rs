/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Execution event types.
//!
//! This module defines the event a worker emits after executing each
//! command. Sinks render events; listeners observe them.

use super::command::Command;
use super::outcome::CommandOutcome;
use super::worker::WorkerRole;
use serde::Serialize;

/// Event emitted after a worker executes a command.
///
/// Sequence numbers are assigned per worker, start at 1 and increase by one
/// for every dequeued command, so within one role they reflect queue order.
///
/// # Examples
///
/// ```
/// use seqshell::{Command, CommandOutcome, ExecutionEvent, WorkerRole};
///
/// let event = ExecutionEvent::new(
///     1,
///     1_234_567_890,
///     WorkerRole::Writer,
///     Command::Reverse,
///     CommandOutcome::Reversed,
/// );
/// assert_eq!(event.sequence_num, 1);
/// assert_eq!(event.lines(), vec!["[LOG] Reversed buffer".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionEvent {
    /// Per-worker monotonically increasing sequence number.
    pub sequence_num: u64,

    /// Nanosecond timestamp when the command was executed.
    pub timestamp_ns: u64,

    /// Role of the worker that executed the command.
    pub role: WorkerRole,

    /// The command that was executed.
    pub command: Command,

    /// The result of executing the command.
    pub outcome: CommandOutcome,
}

impl ExecutionEvent {
    /// Creates a new execution event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        role: WorkerRole,
        command: Command,
        outcome: CommandOutcome,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            role,
            command,
            outcome,
        }
    }

    /// Output lines for this event.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.outcome.lines()
    }
}
