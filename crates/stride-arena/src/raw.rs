//! Raw-address record views.
//!
//! [`RawView`] is the unchecked counterpart of
//! [`StructViewMut`](crate::StructViewMut): it stores the buffer's base
//! address and a byte offset, and its accessors read and write memory
//! directly with no bounds check. It carries no lifetime, so nothing ties it
//! to the array it came from. Repositioning is plain arithmetic and always
//! safe; every dereference is an `unsafe fn` whose caller obligations are
//! listed in its `# Safety` section.
//!
//! This is the only module in the workspace that contains `unsafe` code.

#![allow(unsafe_code)]

use std::ptr::NonNull;

use stride_core::{Field, Scalar};

/// Unchecked, repositionable view over a record buffer.
///
/// Obtained from [`StructArray::raw_view`](crate::StructArray::raw_view).
/// The view stays valid only while the array is alive and has not been
/// reallocated by `grow`, `shrink` or `resize`; nothing detects a violation.
#[derive(Clone, Copy, Debug)]
pub struct RawView {
    base: NonNull<u8>,
    offset: usize,
    record_size: usize,
}

impl RawView {
    pub(crate) fn new(base: NonNull<u8>, record_size: usize) -> Self {
        Self {
            base,
            offset: 0,
            record_size,
        }
    }

    /// Move to byte offset `offset`. No validation is performed.
    #[inline]
    pub fn reposition(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Move to record `index`. No validation is performed.
    #[inline]
    pub fn move_to(&mut self, index: usize) {
        self.offset = index.wrapping_mul(self.record_size);
    }

    /// Current byte offset of the record start.
    pub fn base_offset(&self) -> usize {
        self.offset
    }

    /// Record size this view steps by.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Address of the buffer's first byte.
    pub fn base_address(&self) -> *const u8 {
        self.base.as_ptr()
    }

    /// Read a field with a direct unaligned load.
    ///
    /// # Safety
    ///
    /// - `base_offset() + field.offset() + field.width()` must not exceed
    ///   the capacity of the buffer this view was taken from.
    /// - The buffer must still be alive and must not have been reallocated
    ///   since the view was taken.
    /// - No other thread may be writing the same bytes concurrently.
    #[inline]
    pub unsafe fn get<T: Scalar>(&self, field: Field<T>) -> T {
        // SAFETY: the caller guarantees the address is in bounds of a live
        // allocation; `read_unaligned` has no alignment requirement and
        // `T::Repr` is `Pod`, so any bit pattern is a valid value.
        let repr = unsafe {
            self.base
                .as_ptr()
                .add(self.offset + field.offset())
                .cast::<T::Repr>()
                .read_unaligned()
        };
        T::from_repr(repr)
    }

    /// Write a field with a direct unaligned store.
    ///
    /// # Safety
    ///
    /// Same obligations as [`get`](Self::get); additionally no other view
    /// or reference may be reading the same bytes concurrently.
    #[inline]
    pub unsafe fn set<T: Scalar>(&mut self, field: Field<T>, value: T) {
        // SAFETY: the caller guarantees the address is in bounds of a live,
        // exclusively accessed allocation; `write_unaligned` has no
        // alignment requirement.
        unsafe {
            self.base
                .as_ptr()
                .add(self.offset + field.offset())
                .cast::<T::Repr>()
                .write_unaligned(value.to_repr());
        }
    }
}
