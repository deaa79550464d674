//! # Batching Errors
//!
//! Unified error type for all window, split and encode operations in Batchstream.
//!
//! Covers argument violations, misuse of the two-phase split API, size-limit
//! failures, and transport I/O failures. Size-limit failures (`ItemTooLarge`,
//! `BatchTooLarge`) are kept distinct from I/O errors because they indicate the
//! input itself is unsendable under the configured limits, not a transient
//! condition a caller should retry.

use std::{error, fmt, io};

/// Unified error type for all batching operations.
#[derive(Debug)]
pub enum BatchError {
    /// Underlying I/O failure while writing an encoded message to a transport.
    Io(io::Error),

    /// An offset, count or index argument fell outside the valid range.
    Range(String),

    /// A mutating window operation was called on a window constructed with
    /// `resizable = false`.
    NotResizable,

    /// A single item cannot be encoded within the per-item size ceiling.
    ///
    /// Fatal for that item: shrinking the batch cannot help.
    ItemTooLarge(String),

    /// The aggregate payload ceiling was exceeded and the window cannot be
    /// split further (or splitting would confirm zero items).
    BatchTooLarge(String),

    /// `split` was called on a batch constructed with `can_be_split = false`.
    NotSplittable,

    /// `first_half`/`second_half` was called before `split`.
    SplitNotCalledYet,

    /// Invalid limit configuration (e.g. `max_item_size > max_batch_size`).
    Config(String),

    /// The item codec rejected or failed to serialise an item.
    Codec(String),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Io(e) => write!(f, "I/O error: {}", e),
            BatchError::Range(s) => write!(f, "Range error: {}", s),
            BatchError::NotResizable => write!(f, "Window is not resizable"),
            BatchError::ItemTooLarge(s) => write!(f, "Item too large: {}", s),
            BatchError::BatchTooLarge(s) => write!(f, "Batch too large: {}", s),
            BatchError::NotSplittable => write!(f, "Batch cannot be split"),
            BatchError::SplitNotCalledYet => write!(f, "Split has not been called yet"),
            BatchError::Config(s) => write!(f, "Configuration error: {}", s),
            BatchError::Codec(s) => write!(f, "Codec error: {}", s),
        }
    }
}

impl error::Error for BatchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            BatchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Conversions for error handling

impl From<io::Error> for BatchError {
    fn from(e: io::Error) -> Self {
        BatchError::Io(e)
    }
}
