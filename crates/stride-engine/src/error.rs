//! Engine error types.

use std::error::Error;
use std::fmt;

use stride_core::AccessError;

use crate::config::ConfigError;

/// Errors from iteration and bulk copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Source and target arrays are not copy-compatible: record sizes
    /// differ or the target holds fewer records than the source.
    LayoutMismatch {
        /// Record size of the source array.
        source_record_size: usize,
        /// Record size of the target array.
        target_record_size: usize,
        /// Records in the source array.
        source_len: usize,
        /// Records in the target array.
        target_len: usize,
    },
    /// A plain byte target is shorter than the source's contents.
    TargetTooSmall {
        /// Bytes needed.
        required: usize,
        /// Bytes supplied.
        provided: usize,
    },
    /// A view access failed while visiting a record.
    Access {
        /// Index of the record being visited.
        index: usize,
        /// The underlying access error.
        source: AccessError,
    },
    /// The executor configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutMismatch {
                source_record_size,
                target_record_size,
                source_len,
                target_len,
            } => write!(
                f,
                "layout mismatch: source {source_len} x {source_record_size} bytes, \
                 target {target_len} x {target_record_size} bytes"
            ),
            Self::TargetTooSmall { required, provided } => write!(
                f,
                "target too small: need {required} bytes, got {provided} bytes"
            ),
            Self::Access { index, source } => {
                write!(f, "access to record {index} failed: {source}")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
