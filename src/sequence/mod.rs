/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Thread-safe integer sequence shared by the writer and reader workers.
//!
//! Every operation on [`SharedSequence`] is a single critical section under
//! one mutex, so operations are linearizable with respect to each other and
//! a snapshot never observes a partially applied mutation.

#[cfg(test)]
mod tests;

use crate::error::SequenceError;
use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// An ordered, index-addressable collection of `i64` behind a mutex.
///
/// Share it between workers with `Arc<SharedSequence>`. Out-of-range
/// positions make [`insert_at`](Self::insert_at) and
/// [`remove_at`](Self::remove_at) silent no-ops; use the `try_` variants to
/// learn why a request was ignored.
///
/// # Examples
///
/// ```
/// use seqshell::SharedSequence;
///
/// let sequence = SharedSequence::new();
/// sequence.insert_at(0, 5);
/// sequence.insert_at(1, 3);
/// sequence.insert_at(0, 9);
/// assert_eq!(sequence.snapshot(), vec![9, 5, 3]);
///
/// sequence.insert_at(7, 1);
/// assert_eq!(sequence.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct SharedSequence {
    elements: Mutex<Vec<i64>>,
}

impl SharedSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence holding `elements` in order.
    #[must_use]
    pub fn from_elements(elements: Vec<i64>) -> Self {
        Self {
            elements: Mutex::new(elements),
        }
    }

    // No operation can panic part way through a mutation, so a poisoned
    // guard still holds a consistent Vec.
    fn lock(&self) -> MutexGuard<'_, Vec<i64>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts `value` so that it occupies index `pos`.
    ///
    /// Valid positions are `0..=len`. Returns `false` and leaves the sequence
    /// unchanged for any other position.
    pub fn insert_at(&self, pos: i64, value: i64) -> bool {
        self.try_insert_at(pos, value).is_ok()
    }

    /// Inserts `value` at `pos`, reporting an out-of-range position.
    ///
    /// The bounds check and the insertion happen under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::PositionOutOfRange`] if `pos < 0` or
    /// `pos > len`; the sequence is unchanged.
    pub fn try_insert_at(&self, pos: i64, value: i64) -> Result<(), SequenceError> {
        let mut elements = self.lock();
        let len = elements.len();
        match usize::try_from(pos) {
            Ok(index) if index <= len => {
                elements.insert(index, value);
                Ok(())
            }
            _ => Err(SequenceError::PositionOutOfRange {
                operation: "insert",
                pos,
                len,
            }),
        }
    }

    /// Removes the element at `pos` and returns it.
    ///
    /// Valid positions are `0..len`. Returns `None` and leaves the sequence
    /// unchanged for any other position.
    pub fn remove_at(&self, pos: i64) -> Option<i64> {
        self.try_remove_at(pos).ok()
    }

    /// Removes the element at `pos`, reporting an out-of-range position.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::PositionOutOfRange`] if `pos < 0` or
    /// `pos >= len`; the sequence is unchanged.
    pub fn try_remove_at(&self, pos: i64) -> Result<i64, SequenceError> {
        let mut elements = self.lock();
        let len = elements.len();
        match usize::try_from(pos) {
            Ok(index) if index < len => Ok(elements.remove(index)),
            _ => Err(SequenceError::PositionOutOfRange {
                operation: "remove",
                pos,
                len,
            }),
        }
    }

    /// Sorts the sequence in the given order. Equal values may be reordered.
    pub fn sort(&self, order: SortOrder) {
        let mut elements = self.lock();
        match order {
            SortOrder::Ascending => elements.sort_unstable(),
            SortOrder::Descending => elements.sort_unstable_by(|a, b| b.cmp(a)),
        }
    }

    /// Sorts smallest first.
    #[inline]
    pub fn sort_ascending(&self) {
        self.sort(SortOrder::Ascending);
    }

    /// Sorts largest first.
    #[inline]
    pub fn sort_descending(&self) {
        self.sort(SortOrder::Descending);
    }

    /// Reverses element order in place.
    pub fn reverse(&self) {
        self.lock().reverse();
    }

    /// Returns an independent copy of the whole sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i64> {
        self.lock().clone()
    }

    /// Returns the current number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
