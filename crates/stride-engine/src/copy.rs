//! Bulk copy between arrays.
//!
//! Both strategies write only target records `0..source.len()`; anything
//! beyond stays exactly as it was. Compatibility is checked before the
//! first byte moves, so a rejected copy leaves the target untouched.

use stride_arena::{StructArray, StructView, StructViewMut};
use stride_core::{AccessError, FieldDef, Value};

use crate::error::EngineError;

/// Copy strategy for [`copy_to`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyMode {
    /// One contiguous byte copy of the whole source region.
    #[default]
    Raw,
    /// Every declared field of every record, one byte range at a time.
    /// Field bytes are copied without decoding, so the result matches
    /// [`Raw`](Self::Raw) everywhere except declared padding, which is not
    /// copied.
    FieldWise,
}

fn check_compatible(source: &StructArray<'_>, target: &StructArray<'_>) -> Result<(), EngineError> {
    if source.record_size() != target.record_size() || target.len() < source.len() {
        return Err(EngineError::LayoutMismatch {
            source_record_size: source.record_size(),
            target_record_size: target.record_size(),
            source_len: source.len(),
            target_len: target.len(),
        });
    }
    Ok(())
}

/// Copy records `0..source.len()` of `source` into the same indices of
/// `target`.
///
/// Fails with [`EngineError::LayoutMismatch`] if the record sizes differ or
/// `target` is shorter than `source`.
pub fn copy_to(
    source: &StructArray<'_>,
    target: &mut StructArray<'_>,
    mode: CopyMode,
) -> Result<(), EngineError> {
    check_compatible(source, target)?;
    match mode {
        CopyMode::Raw => {
            let bytes = source.as_bytes();
            target.as_bytes_mut()[..bytes.len()].copy_from_slice(bytes);
            Ok(())
        }
        CopyMode::FieldWise => {
            each_field(source, target, |to, from, def| to.copy_field_from(from, def))
        }
    }
}

/// Field-wise copy with a per-field hook.
///
/// For every record and every field of the source layout, `transform`
/// receives the field and the decoded source value and returns the value
/// written to the target. Values are re-encoded, so a bool word other than
/// `0` or `1` is written back as `0`. Returning a value of another type
/// fails with [`EngineError::Access`] at that record; earlier records are
/// already written.
pub fn copy_fields_with<F>(
    source: &StructArray<'_>,
    target: &mut StructArray<'_>,
    mut transform: F,
) -> Result<(), EngineError>
where
    F: FnMut(&FieldDef, Value) -> Value,
{
    check_compatible(source, target)?;
    each_field(source, target, |to, from, def| {
        let value = from.get_value(def)?;
        to.set_value(def, transform(def, value))
    })
}

/// Walk records `0..source.len()` with one view per array and apply `step`
/// to every field of the source layout.
fn each_field<F>(
    source: &StructArray<'_>,
    target: &mut StructArray<'_>,
    mut step: F,
) -> Result<(), EngineError>
where
    F: FnMut(&mut StructViewMut<'_>, &StructView<'_>, &FieldDef) -> Result<(), AccessError>,
{
    let count = source.len();
    let (Some(mut from), Some(mut to)) = (source.view(), target.view_mut()) else {
        return Ok(());
    };
    let fields: Vec<&FieldDef> = source.layout().fields().collect();
    for index in 0..count {
        from.move_to(index)
            .and_then(|()| to.move_to(index))
            .and_then(|()| {
                fields
                    .iter()
                    .try_for_each(|def| step(&mut to, &from, *def))
            })
            .map_err(|source| EngineError::Access { index, source })?;
    }
    Ok(())
}

/// Copy the whole contents of `source` into the start of `target`.
///
/// Returns the number of bytes written. Bytes past that count are left
/// untouched.
pub fn copy_to_bytes(source: &StructArray<'_>, target: &mut [u8]) -> Result<usize, EngineError> {
    let bytes = source.as_bytes();
    if target.len() < bytes.len() {
        return Err(EngineError::TargetTooSmall {
            required: bytes.len(),
            provided: target.len(),
        });
    }
    target[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}
