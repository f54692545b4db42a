//! Benchmark profiles for the Stride struct array library.
//!
//! Provides pre-built arrays and executors for the criterion benches:
//!
//! - [`vec3_profile`]: zeroed vec3 array (12-byte records)
//! - [`mixed_profile`]: seeded random mixed array (16-byte records)
//! - [`parallel_executor`]: executor sized for the benchmark machine

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stride_arena::StructArray;
use stride_engine::{Executor, ExecutorConfig};
use stride_test_utils::fixtures::random_mixed;
use stride_test_utils::vec3_layout;

/// Record count used by the reference profiles.
pub const REFERENCE_COUNT: usize = 100_000;

/// Zeroed vec3 array of `count` records.
pub fn vec3_profile(count: usize) -> StructArray<'static> {
    StructArray::zeroed(vec3_layout(), count).expect("profile fits in memory")
}

/// Seeded random mixed array of `count` records.
pub fn mixed_profile(count: usize, seed: u64) -> StructArray<'static> {
    random_mixed(count, seed)
}

/// Executor with auto-detected workers and the default partition length.
pub fn parallel_executor() -> Executor {
    Executor::new(ExecutorConfig::default()).expect("default config is valid")
}
