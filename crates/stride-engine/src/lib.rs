//! Iteration and bulk copy over Stride struct arrays.
//!
//! Two traversal paths visit every record of a
//! [`StructArray`](stride_arena::StructArray):
//!
//! - **Sequential** ([`for_each`], [`visit`], [`for_each_raw`]): one view,
//!   created once and repositioned to `i * record_size` for ascending `i`.
//! - **Parallel** ([`Executor::for_each`] with [`Traversal::Parallel`]): the
//!   buffer is split into disjoint record-aligned chunks, one per partition,
//!   and each worker of a dedicated `rayon` pool walks its chunk with a
//!   private view.
//!
//! [`copy_to`] moves records between arrays of equal record size either as
//! one byte copy ([`CopyMode::Raw`]) or field by field
//! ([`CopyMode::FieldWise`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod copy;
pub mod error;
pub mod executor;
pub mod iter;

pub use config::{ConfigError, ExecutorConfig};
pub use copy::{copy_fields_with, copy_to, copy_to_bytes, CopyMode};
pub use error::EngineError;
pub use executor::{Executor, Traversal};
pub use iter::{for_each, for_each_raw, partition, visit, PartitionPlan};
