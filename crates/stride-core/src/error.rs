//! Error types for layout registration and field access.
//!
//! [`LayoutError`] covers configuration mistakes detected while a layout is
//! built or a typed field is resolved. [`AccessError`] covers bounds and type
//! violations detected by the checked view on every access.

use std::error::Error;
use std::fmt;

use crate::field::ScalarType;

/// Errors from building a [`RecordLayout`](crate::RecordLayout) or resolving
/// a typed [`Field`](crate::Field).
///
/// These are setup-time failures: they never occur on the access path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout declares no fields.
    Empty,
    /// A field was declared with an empty name.
    EmptyName,
    /// Two fields share the same name.
    DuplicateField {
        /// The repeated name.
        name: String,
    },
    /// Explicit padding of zero bytes was declared.
    ZeroPadding,
    /// The summed record size does not fit in `usize`.
    SizeOverflow,
    /// No field with this name is registered.
    UnknownField {
        /// The requested name.
        name: String,
    },
    /// The field exists but was declared with a different type.
    TypeMismatch {
        /// The requested name.
        name: String,
        /// Type the field was declared with.
        declared: ScalarType,
        /// Type the caller asked for.
        requested: ScalarType,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "record layout declares no fields"),
            Self::EmptyName => write!(f, "field name must not be empty"),
            Self::DuplicateField { name } => write!(f, "duplicate field '{name}'"),
            Self::ZeroPadding => write!(f, "padding must be at least one byte"),
            Self::SizeOverflow => write!(f, "record size overflows usize"),
            Self::UnknownField { name } => write!(f, "unknown field '{name}'"),
            Self::TypeMismatch {
                name,
                declared,
                requested,
            } => write!(
                f,
                "field '{name}' is declared as {declared}, requested as {requested}"
            ),
        }
    }
}

impl Error for LayoutError {}

/// Errors from a bounds-checked view access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The byte range `[offset, offset + len)` lies outside the buffer.
    OutOfRange {
        /// First byte of the attempted access.
        offset: usize,
        /// Number of bytes accessed.
        len: usize,
        /// Capacity of the buffer in bytes.
        capacity: usize,
    },
    /// A dynamic value does not match the field's declared type.
    TypeMismatch {
        /// Type the field was declared with.
        declared: ScalarType,
        /// Type of the supplied value.
        supplied: ScalarType,
    },
    /// A stored enum ordinal names no variant.
    InvalidOrdinal {
        /// The ordinal read from the buffer.
        ordinal: i32,
    },
    /// Two records of different sizes cannot be copied onto each other.
    RecordSizeMismatch {
        /// Record size of the source.
        source: usize,
        /// Record size of the target.
        target: usize,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                offset,
                len,
                capacity,
            } => write!(
                f,
                "access of {len} bytes at offset {offset} exceeds capacity {capacity}"
            ),
            Self::TypeMismatch { declared, supplied } => {
                write!(f, "field declared as {declared}, got {supplied}")
            }
            Self::InvalidOrdinal { ordinal } => {
                write!(f, "stored ordinal {ordinal} names no enum variant")
            }
            Self::RecordSizeMismatch { source, target } => write!(
                f,
                "record size mismatch: source {source} bytes, target {target} bytes"
            ),
        }
    }
}

impl Error for AccessError {}
