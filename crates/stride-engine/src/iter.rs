//! Sequential traversal and the partition plan for parallel traversal.
//!
//! Sequential traversal creates exactly one view, positions it at record 0,
//! and repositions it to `i * record_size` for every `i` in ascending order.
//! The action receives that same view each time, so a pass allocates nothing
//! per record.

use std::ops::Range;

use smallvec::SmallVec;
use stride_arena::{RawView, StructArray, StructView, StructViewMut};
use stride_core::AccessError;

use crate::error::EngineError;

/// Index ranges handed to parallel workers.
pub type PartitionPlan = SmallVec<[Range<usize>; 16]>;

/// Visit every record in ascending index order with one reused writable
/// view.
///
/// Stops at the first error returned by `action` and reports its index.
pub fn for_each<F>(array: &mut StructArray<'_>, mut action: F) -> Result<(), EngineError>
where
    F: FnMut(usize, &mut StructViewMut<'_>) -> Result<(), AccessError>,
{
    let len = array.len();
    let Some(mut view) = array.view_mut() else {
        return Ok(());
    };
    for index in 0..len {
        view.move_to(index)
            .and_then(|()| action(index, &mut view))
            .map_err(|source| EngineError::Access { index, source })?;
    }
    Ok(())
}

/// Visit every record in ascending index order with one reused read-only
/// view.
pub fn visit<F>(array: &StructArray<'_>, mut action: F) -> Result<(), EngineError>
where
    F: FnMut(usize, &StructView<'_>) -> Result<(), AccessError>,
{
    let Some(mut view) = array.view() else {
        return Ok(());
    };
    for index in 0..array.len() {
        view.move_to(index)
            .and_then(|()| action(index, &view))
            .map_err(|source| EngineError::Access { index, source })?;
    }
    Ok(())
}

/// Visit every record in ascending index order with one reused
/// [`RawView`].
///
/// The traversal itself only positions the view within `0..len`;
/// dereferencing it inside `action` is the caller's `unsafe` and stays
/// sound as long as `action` touches only fields of the layout the array
/// was built with.
pub fn for_each_raw<F>(array: &mut StructArray<'_>, mut action: F)
where
    F: FnMut(usize, &mut RawView),
{
    let mut view = array.raw_view();
    for index in 0..array.len() {
        view.move_to(index);
        action(index, &mut view);
    }
}

/// Split `0..count` into at most `workers` contiguous, disjoint ranges.
///
/// All ranges except the last have the same length, and that length is at
/// least `min_len`; the last range may be shorter. When `count < 2 *
/// min_len` the whole range is one partition.
pub fn partition(count: usize, workers: usize, min_len: usize) -> PartitionPlan {
    let mut plan = PartitionPlan::new();
    if count == 0 {
        return plan;
    }
    let by_size = (count / min_len.max(1)).max(1);
    let parts = workers.max(1).min(by_size);
    let chunk = count.div_ceil(parts);
    let mut start = 0;
    while start < count {
        let end = (start + chunk).min(count);
        plan.push(start..end);
        start = end;
    }
    plan
}
