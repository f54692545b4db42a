//! Partitioned parallel traversal over a dedicated worker pool.
//!
//! The executor never shares a view between workers. For a parallel pass
//! the array's bytes are cut with `par_chunks_mut` into disjoint,
//! record-aligned chunks following the [`partition`] plan, and each worker
//! builds its own [`StructViewMut`] over its chunk. Disjointness comes from
//! slice splitting, so no locks are taken on the hot path.

use stride_arena::{StructArray, StructViewMut};
use stride_core::{AccessError, RecordLayout};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::{ConfigError, ExecutorConfig};
use crate::error::EngineError;
use crate::iter::{self, partition, PartitionPlan};

/// How [`Executor::for_each`] walks an array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Traversal {
    /// One view, ascending index order, on the calling thread.
    #[default]
    Sequential,
    /// One private view per partition, partitions run on the pool.
    Parallel,
}

/// Owns the worker pool used for parallel traversal.
pub struct Executor {
    pool: ThreadPool,
    config: ExecutorConfig,
}

impl Executor {
    /// Validate `config` and build a pool of
    /// [`resolved_worker_count`](ExecutorConfig::resolved_worker_count)
    /// threads.
    pub fn new(config: ExecutorConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let workers = config.resolved_worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("stride-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::PoolBuildFailed {
                reason: e.to_string(),
            })?;
        log::debug!(
            "executor pool ready: {workers} workers, min partition {} records",
            config.min_partition_len
        );
        Ok(Self { pool, config })
    }

    /// Number of worker threads in the pool.
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// The configuration this executor was built with.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// The partition plan a parallel pass over `count` records would use.
    pub fn partitions(&self, count: usize) -> PartitionPlan {
        partition(count, self.worker_count(), self.config.min_partition_len)
    }

    /// Visit every record of `array` with `action`.
    ///
    /// [`Traversal::Sequential`] behaves exactly like [`iter::for_each`].
    /// [`Traversal::Parallel`] visits every index exactly once, each
    /// partition in ascending order, partitions concurrently. `action`
    /// always receives the global record index; the view itself is
    /// positioned relative to its partition, so use the index argument
    /// rather than [`StructViewMut::index`] to identify the record.
    ///
    /// Each partition stops at its first error. Of the partitions that
    /// failed, the error with the lowest index is returned.
    pub fn for_each<F>(
        &self,
        array: &mut StructArray<'_>,
        traversal: Traversal,
        action: F,
    ) -> Result<(), EngineError>
    where
        F: Fn(usize, &mut StructViewMut<'_>) -> Result<(), AccessError> + Sync + Send,
    {
        match traversal {
            Traversal::Sequential => iter::for_each(array, action),
            Traversal::Parallel => self.for_each_parallel(array, &action),
        }
    }

    fn for_each_parallel<F>(
        &self,
        array: &mut StructArray<'_>,
        action: &F,
    ) -> Result<(), EngineError>
    where
        F: Fn(usize, &mut StructViewMut<'_>) -> Result<(), AccessError> + Sync + Send,
    {
        let count = array.len();
        let plan = self.partitions(count);
        let Some(first) = plan.first() else {
            return Ok(());
        };
        let chunk_records = first.len();
        log::trace!("parallel pass: {count} records in {} partitions", plan.len());

        let (bytes, layout) = array.as_parts_mut();
        let record_size = layout.record_size();
        let bytes = &mut bytes[..count * record_size];

        let results: Vec<Result<(), EngineError>> = self.pool.install(|| {
            bytes
                .par_chunks_mut(chunk_records * record_size)
                .enumerate()
                .map(|(part, chunk)| run_partition(chunk, layout, part * chunk_records, action))
                .collect()
        });
        // Partition order is index order, so the first error is the lowest.
        results.into_iter().collect()
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("workers", &self.worker_count())
            .field("config", &self.config)
            .finish()
    }
}

fn run_partition<F>(
    chunk: &mut [u8],
    layout: &RecordLayout,
    start: usize,
    action: &F,
) -> Result<(), EngineError>
where
    F: Fn(usize, &mut StructViewMut<'_>) -> Result<(), AccessError>,
{
    let records = chunk.len() / layout.record_size();
    let mut view = StructViewMut::new(chunk, layout)
        .map_err(|source| EngineError::Access { index: start, source })?;
    for local in 0..records {
        let index = start + local;
        view.move_to(local)
            .and_then(|()| action(index, &mut view))
            .map_err(|source| EngineError::Access { index, source })?;
    }
    Ok(())
}
