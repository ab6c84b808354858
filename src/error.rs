/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types.
//!
//! None of these are fatal to a worker. [`SequenceError`] travels inside a
//! rejected [`CommandOutcome`](crate::CommandOutcome) and is rendered as an
//! output line; the others are surfaced to whoever drives the dispatcher.

use crate::dispatch::WorkerRole;
use serde::Serialize;
use std::io;
use thiserror::Error;

/// Errors raised while applying a command to the shared sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceError {
    /// The requested position lies outside the valid range for the operation.
    #[error("invalid position {pos} for {operation}: sequence length is {len}")]
    PositionOutOfRange {
        /// Name of the rejected operation (`insert` or `remove`).
        operation: &'static str,
        /// The position that was requested.
        pos: i64,
        /// Length of the sequence when the request was checked.
        len: usize,
    },
}

/// Errors returned by [`Dispatcher`](crate::Dispatcher) entry points.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Shutdown has been requested; the command was not queued.
    #[error("dispatcher has been shut down")]
    ShutDown,

    /// A command was submitted to the queue of the other class.
    #[error("command '{command}' cannot be submitted to the {expected} queue")]
    WrongClass {
        /// Name of the submitted command.
        command: &'static str,
        /// The queue it was submitted to.
        expected: WorkerRole,
    },

    /// A worker task ended abnormally.
    #[error("{role} worker failed to join: {source}")]
    WorkerJoin {
        /// Role of the failed worker.
        role: WorkerRole,
        /// The underlying join error.
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Errors produced by the line parser. These never reach a queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first token is not a known command.
    #[error("Unknown command: {0}\nType 'help' for available commands")]
    UnknownCommand(String),

    /// The command is known but its arguments are missing or malformed.
    #[error("Invalid arguments for command '{0}'. Type 'help' for usage.")]
    InvalidArguments(String),
}

/// Errors that end a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing to the terminal failed.
    #[error("shell i/o error: {0}")]
    Io(#[from] io::Error),

    /// The dispatcher rejected a submission or failed to shut down.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
