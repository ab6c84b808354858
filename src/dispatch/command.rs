/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Command types.
//!
//! This module defines the deferred operations that workers apply to the
//! shared sequence.

use super::outcome::CommandOutcome;
use super::worker::WorkerRole;
use crate::sequence::{SharedSequence, SortOrder};
use serde::Serialize;

/// One requested operation against a [`SharedSequence`].
///
/// A command carries every argument it needs and is immutable once built.
/// Mutating variants belong to the writer class, observing variants to the
/// reader class; see [`Command::class`].
///
/// # Examples
///
/// ```
/// use seqshell::{Command, CommandOutcome, SharedSequence, WorkerRole};
///
/// let sequence = SharedSequence::from_elements(vec![3, 1, 2]);
/// let command = Command::SortAscending;
/// assert_eq!(command.class(), WorkerRole::Writer);
///
/// command.execute(&sequence);
/// let outcome = Command::Read.execute(&sequence);
/// assert_eq!(outcome, CommandOutcome::Snapshot { elements: vec![1, 2, 3] });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Insert `value` so that it occupies index `pos`.
    Insert {
        /// Target index.
        pos: i64,
        /// Value to insert.
        value: i64,
    },

    /// Remove the element at `pos`.
    Remove {
        /// Target index.
        pos: i64,
    },

    /// Sort smallest first.
    SortAscending,

    /// Sort largest first.
    SortDescending,

    /// Reverse element order.
    Reverse,

    /// Render a snapshot of the sequence.
    Read,

    /// Count even and odd index positions.
    CountParity,
}

impl Command {
    /// Builds the sort command for `order`.
    #[must_use]
    pub fn sort(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Self::SortAscending,
            SortOrder::Descending => Self::SortDescending,
        }
    }

    /// Returns the class of worker that executes this command.
    #[must_use]
    pub fn class(&self) -> WorkerRole {
        match self {
            Self::Insert { .. }
            | Self::Remove { .. }
            | Self::SortAscending
            | Self::SortDescending
            | Self::Reverse => WorkerRole::Writer,
            Self::Read | Self::CountParity => WorkerRole::Reader,
        }
    }

    /// Returns the shell name of this command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Remove { .. } => "remove",
            Self::SortAscending | Self::SortDescending => "sort",
            Self::Reverse => "reverse",
            Self::Read => "read",
            Self::CountParity => "count",
        }
    }

    /// Applies the command to `sequence`.
    ///
    /// Performs exactly one sequence operation. An out-of-range position is
    /// returned as [`CommandOutcome::Rejected`], never as a panic.
    pub fn execute(&self, sequence: &SharedSequence) -> CommandOutcome {
        match *self {
            Self::Insert { pos, value } => match sequence.try_insert_at(pos, value) {
                Ok(()) => CommandOutcome::Inserted { pos, value },
                Err(error) => CommandOutcome::Rejected { error },
            },
            Self::Remove { pos } => match sequence.try_remove_at(pos) {
                Ok(_) => CommandOutcome::Removed { pos },
                Err(error) => CommandOutcome::Rejected { error },
            },
            Self::SortAscending => {
                sequence.sort(SortOrder::Ascending);
                CommandOutcome::Sorted {
                    order: SortOrder::Ascending,
                }
            }
            Self::SortDescending => {
                sequence.sort(SortOrder::Descending);
                CommandOutcome::Sorted {
                    order: SortOrder::Descending,
                }
            }
            Self::Reverse => {
                sequence.reverse();
                CommandOutcome::Reversed
            }
            Self::Read => CommandOutcome::Snapshot {
                elements: sequence.snapshot(),
            },
            Self::CountParity => {
                let (even, odd) = parity_counts(sequence.len());
                CommandOutcome::ParityCount { even, odd }
            }
        }
    }
}

/// Counts index positions by parity for a sequence of `len` elements.
///
/// Position 0 is even, so `even = ceil(len / 2)` and `odd = floor(len / 2)`.
#[inline]
#[must_use]
pub fn parity_counts(len: usize) -> (usize, usize) {
    (len.div_ceil(2), len / 2)
}
