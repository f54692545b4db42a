//! Struct array error types.

use std::error::Error;
use std::fmt;

use stride_core::AccessError;

/// Errors that can occur during struct array operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An index at or beyond the array length was requested.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of records in the array.
        len: usize,
    },
    /// `grow` was asked for fewer records than the array holds.
    CapacityShrink {
        /// Current record count.
        current: usize,
        /// Requested record count.
        requested: usize,
    },
    /// `shrink` was asked for more records than the array holds.
    CapacityGrow {
        /// Current record count.
        current: usize,
        /// Requested record count.
        requested: usize,
    },
    /// A borrowed buffer cannot hold the requested record count.
    BufferTooSmall {
        /// Bytes needed for `count * record_size`.
        required: usize,
        /// Bytes supplied by the caller.
        provided: usize,
    },
    /// `count * record_size` does not fit in `usize`.
    SizeOverflow {
        /// Requested record count.
        count: usize,
        /// Record size in bytes.
        record_size: usize,
    },
    /// A view access failed while initialising or touching a record.
    Access {
        /// Index of the record being accessed.
        index: usize,
        /// The underlying access error.
        source: AccessError,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for array of {len} records")
            }
            Self::CapacityShrink { current, requested } => write!(
                f,
                "cannot grow from {current} to {requested} records: new count is smaller"
            ),
            Self::CapacityGrow { current, requested } => write!(
                f,
                "cannot shrink from {current} to {requested} records: new count is larger"
            ),
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "buffer too small: need {required} bytes, got {provided} bytes"
            ),
            Self::SizeOverflow { count, record_size } => write!(
                f,
                "{count} records of {record_size} bytes overflow the address space"
            ),
            Self::Access { index, source } => {
                write!(f, "access to record {index} failed: {source}")
            }
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access { source, .. } => Some(source),
            _ => None,
        }
    }
}
