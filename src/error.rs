//! Typed errors for the record store. The three kinds map one-to-one onto the
//! failure modes callers have to distinguish: bad input, a stale record
//! identifier, and the backing file misbehaving. The TUI turns each into its
//! own footer message, so the wording here is user-facing.

use std::io;

use thiserror::Error;

use crate::models::RecordId;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required text field was blank when appending a record.
    #[error("{field} is required.")]
    MissingField { field: &'static str },

    /// A text field contained a line break, which the line-oriented ledger
    /// file cannot hold.
    #[error("{field} must be a single line.")]
    MultilineField { field: &'static str },

    /// An amount entered by the caller was not a whole number.
    #[error("Amount {value:?} is not a whole number.")]
    InvalidAmount { value: String },

    /// Aggregation hit a stored amount that does not parse. Names the row so
    /// the offending record can be found and repaired instead of silently
    /// skipping it.
    #[error("Record {row} ({customer}) has an unreadable amount {value:?}.")]
    UnreadableAmount {
        row: usize,
        customer: String,
        value: String,
    },

    /// The identifier no longer names a live record, typically because the
    /// record was deleted after the caller picked it from a listing.
    #[error("Record {id} is no longer in the ledger.")]
    RecordGone { id: RecordId },

    /// The backing file could not be read or written. In-memory state is
    /// left untouched when this surfaces from a mutating operation.
    #[error("Failed to {action} the ledger file.")]
    Storage {
        action: &'static str,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Wrap an I/O failure with the action that was being attempted.
    pub(crate) fn storage(action: &'static str, source: io::Error) -> Self {
        StoreError::Storage { action, source }
    }
}
