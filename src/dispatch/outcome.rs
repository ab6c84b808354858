/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Command outcome types.
//!
//! This module defines what a worker learned from executing one command and
//! how that is rendered as output lines.

use crate::error::SequenceError;
use crate::sequence::SortOrder;
use serde::Serialize;

/// Result of executing a [`Command`](super::Command).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// A value was inserted.
    Inserted {
        /// Index the value now occupies.
        pos: i64,
        /// The inserted value.
        value: i64,
    },

    /// An element was removed.
    Removed {
        /// Index the element was removed from.
        pos: i64,
    },

    /// The sequence was sorted.
    Sorted {
        /// Sort direction.
        order: SortOrder,
    },

    /// The sequence was reversed.
    Reversed,

    /// A consistent copy of the sequence.
    Snapshot {
        /// Elements in order.
        elements: Vec<i64>,
    },

    /// Number of even and odd index positions.
    ParityCount {
        /// Even positions, counting position 0.
        even: usize,
        /// Odd positions.
        odd: usize,
    },

    /// The command was not applied.
    Rejected {
        /// Why it was rejected.
        error: SequenceError,
    },
}

impl CommandOutcome {
    /// Returns `true` if the command was applied.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.is_rejected()
    }

    /// Returns `true` if the command was rejected.
    #[inline]
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Renders the outcome as the lines shown to the user.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqshell::CommandOutcome;
    ///
    /// let outcome = CommandOutcome::Snapshot { elements: vec![9, 5, 3] };
    /// assert_eq!(outcome.lines(), vec!["Buffer: [9, 5, 3]".to_string()]);
    /// ```
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Inserted { pos, value } => {
                vec![format!("[LOG] Inserted {value} at position {pos}")]
            }
            Self::Removed { pos } => vec![format!("[LOG] Removed element at position {pos}")],
            Self::Sorted { order } => vec![format!("[LOG] Sorted buffer in {order} order")],
            Self::Reversed => vec!["[LOG] Reversed buffer".to_string()],
            Self::Snapshot { elements } => {
                let rendered: Vec<String> = elements.iter().map(i64::to_string).collect();
                vec![format!("Buffer: [{}]", rendered.join(", "))]
            }
            Self::ParityCount { even, odd } => vec![
                format!("Even positions: {even}"),
                format!("Odd positions: {odd}"),
            ],
            Self::Rejected { error } => vec![format!("[ERROR] {error}")],
        }
    }
}
