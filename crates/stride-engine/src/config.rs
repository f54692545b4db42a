//! Executor configuration and validation.
//!
//! [`ExecutorConfig`] sizes the worker pool used by partitioned parallel
//! iteration. [`validate()`](ExecutorConfig::validate) checks structural
//! invariants before [`Executor::new`](crate::Executor::new) builds the pool.

use std::error::Error;
use std::fmt;

// ── ExecutorConfig ─────────────────────────────────────────────────

/// Configuration for an [`Executor`](crate::Executor).
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub worker_count: Option<usize>,
    /// Smallest number of records worth handing to a separate partition.
    /// Arrays shorter than `2 * min_partition_len` run as one partition.
    /// Default: 1024. Must be at least 1.
    pub min_partition_len: usize,
}

impl ExecutorConfig {
    /// Default minimum partition length.
    pub const DEFAULT_MIN_PARTITION_LEN: usize = 1024;

    /// Upper bound on the worker count.
    pub const MAX_WORKERS: usize = 64;

    /// Config with an explicit worker count and default partition length.
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count: Some(worker_count),
            ..Self::default()
        }
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, Self::MAX_WORKERS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, Self::MAX_WORKERS),
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_partition_len == 0 {
            return Err(ConfigError::ZeroPartitionLen);
        }
        if self.worker_count == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            min_partition_len: Self::DEFAULT_MIN_PARTITION_LEN,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ExecutorConfig::validate()`] or pool
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_partition_len` is zero.
    ZeroPartitionLen,
    /// An explicit worker count of zero was requested.
    ZeroWorkers,
    /// The worker pool could not be built.
    PoolBuildFailed {
        /// Description from the thread pool builder.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPartitionLen => write!(f, "min_partition_len must be at least 1"),
            Self::ZeroWorkers => write!(f, "worker_count must be at least 1"),
            Self::PoolBuildFailed { reason } => {
                write!(f, "worker pool could not be built: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}
