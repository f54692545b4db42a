//! Arrays of fixed-shape records in one contiguous buffer.
//!
//! A [`StructArray`] pairs a [`Buffer`] with a shared [`RecordLayout`] and a
//! record count, keeping `capacity_bytes == len * record_size` at every
//! observable point. Records are never materialised as objects: callers get
//! short-lived views positioned at `index * record_size`.

use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use stride_core::{AccessError, RecordLayout};

use crate::buffer::Buffer;
use crate::error::ArrayError;
use crate::raw::RawView;
use crate::view::{StructView, StructViewMut};

/// Compute `count * record_size`, reporting overflow.
pub fn byte_len(layout: &RecordLayout, count: usize) -> Result<usize, ArrayError> {
    count
        .checked_mul(layout.record_size())
        .ok_or(ArrayError::SizeOverflow {
            count,
            record_size: layout.record_size(),
        })
}

/// A packed array of records sharing one layout.
///
/// The lifetime `'a` is the borrow of caller-supplied storage; arrays that
/// own their buffer are `StructArray<'static>`.
pub struct StructArray<'a> {
    buffer: Buffer<'a>,
    layout: Arc<RecordLayout>,
    len: usize,
}

impl StructArray<'static> {
    /// Allocate a zeroed array of `count` records and run `init` once per
    /// slot, in ascending index order.
    ///
    /// `init` is the element factory: it receives the slot index and a view
    /// positioned on that slot.
    pub fn new<F>(layout: Arc<RecordLayout>, count: usize, init: F) -> Result<Self, ArrayError>
    where
        F: FnMut(usize, &mut StructViewMut<'_>) -> Result<(), AccessError>,
    {
        let bytes = byte_len(&layout, count)?;
        let mut array = Self {
            buffer: Buffer::zeroed(bytes),
            layout,
            len: count,
        };
        array.init_each(init)?;
        Ok(array)
    }

    /// Allocate a zeroed array of `count` records.
    pub fn zeroed(layout: Arc<RecordLayout>, count: usize) -> Result<Self, ArrayError> {
        Self::new(layout, count, |_, _| Ok(()))
    }
}

impl<'a> StructArray<'a> {
    /// Build an array over caller-owned storage and run `init` once per
    /// slot.
    ///
    /// Only the leading `count * record_size` bytes are used; a longer
    /// slice is narrowed, a shorter one is rejected. Bytes that `init`
    /// does not write keep their previous contents.
    pub fn with_buffer<F>(
        layout: Arc<RecordLayout>,
        count: usize,
        storage: &'a mut [u8],
        init: F,
    ) -> Result<Self, ArrayError>
    where
        F: FnMut(usize, &mut StructViewMut<'_>) -> Result<(), AccessError>,
    {
        let required = byte_len(&layout, count)?;
        if storage.len() < required {
            return Err(ArrayError::BufferTooSmall {
                required,
                provided: storage.len(),
            });
        }
        let mut array = Self {
            buffer: Buffer::borrowed(&mut storage[..required]),
            layout,
            len: count,
        };
        array.init_each(init)?;
        Ok(array)
    }

    /// Build an array over caller-owned storage, keeping its contents.
    pub fn borrowed(
        layout: Arc<RecordLayout>,
        count: usize,
        storage: &'a mut [u8],
    ) -> Result<Self, ArrayError> {
        Self::with_buffer(layout, count, storage, |_, _| Ok(()))
    }

    fn init_each<F>(&mut self, mut init: F) -> Result<(), ArrayError>
    where
        F: FnMut(usize, &mut StructViewMut<'_>) -> Result<(), AccessError>,
    {
        let len = self.len;
        let Some(mut view) = self.view_mut() else {
            return Ok(());
        };
        for index in 0..len {
            view.move_to(index)
                .and_then(|()| init(index, &mut view))
                .map_err(|source| ArrayError::Access { index, source })?;
        }
        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of one record in bytes.
    pub fn record_size(&self) -> usize {
        self.layout.record_size()
    }

    /// Buffer capacity in bytes (`len * record_size`).
    pub fn capacity_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// The shared record layout.
    pub fn layout(&self) -> &Arc<RecordLayout> {
        &self.layout
    }

    /// Whether the storage was lent by the caller.
    pub fn is_borrowed(&self) -> bool {
        self.buffer.is_borrowed()
    }

    /// All record bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// All record bytes, writable.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Split into the writable bytes and the layout, for callers that
    /// partition the buffer themselves.
    pub fn as_parts_mut(&mut self) -> (&mut [u8], &RecordLayout) {
        (self.buffer.as_mut_slice(), &*self.layout)
    }

    /// A read-only view of record `index`.
    pub fn get(&self, index: usize) -> Result<StructView<'_>, ArrayError> {
        let base = self.checked_base(index)?;
        StructView::at(self.buffer.as_slice(), &self.layout, base)
            .map_err(|source| ArrayError::Access { index, source })
    }

    /// A writable view of record `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<StructViewMut<'_>, ArrayError> {
        let base = self.checked_base(index)?;
        StructViewMut::at(self.buffer.as_mut_slice(), &self.layout, base)
            .map_err(|source| ArrayError::Access { index, source })
    }

    fn checked_base(&self, index: usize) -> Result<usize, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(index * self.layout.record_size())
    }

    /// A read-only view at record 0, or `None` if the array is empty.
    pub fn view(&self) -> Option<StructView<'_>> {
        StructView::new(self.buffer.as_slice(), &self.layout).ok()
    }

    /// A writable view at record 0, or `None` if the array is empty.
    pub fn view_mut(&mut self) -> Option<StructViewMut<'_>> {
        StructViewMut::new(self.buffer.as_mut_slice(), &self.layout).ok()
    }

    /// An unchecked view at record 0.
    ///
    /// Taking the view is safe; dereferencing it is not. The view is
    /// invalidated by dropping the array or by any reallocation.
    pub fn raw_view(&mut self) -> RawView {
        let base = NonNull::from(self.buffer.as_mut_slice()).cast::<u8>();
        RawView::new(base, self.layout.record_size())
    }

    /// Grow to `new_count` records, preserving records `0..len`.
    ///
    /// New records are zeroed. A borrowed buffer is copied into an owned
    /// allocation and the caller's storage is left untouched. Fails without
    /// modifying the array if `new_count < len`.
    pub fn grow(&mut self, new_count: usize) -> Result<(), ArrayError> {
        if new_count < self.len {
            return Err(ArrayError::CapacityShrink {
                current: self.len,
                requested: new_count,
            });
        }
        self.reallocate(new_count)
    }

    /// Shrink to `new_count` records, preserving records `0..new_count`.
    ///
    /// Fails without modifying the array if `new_count > len`.
    pub fn shrink(&mut self, new_count: usize) -> Result<(), ArrayError> {
        if new_count > self.len {
            return Err(ArrayError::CapacityGrow {
                current: self.len,
                requested: new_count,
            });
        }
        self.reallocate(new_count)
    }

    /// Resize to `new_count` records in either direction, preserving the
    /// common prefix.
    pub fn resize(&mut self, new_count: usize) -> Result<(), ArrayError> {
        self.reallocate(new_count)
    }

    fn reallocate(&mut self, new_count: usize) -> Result<(), ArrayError> {
        if new_count == self.len {
            return Ok(());
        }
        let bytes = byte_len(&self.layout, new_count)?;
        log::debug!(
            "reallocating struct array: {} -> {} records ({} -> {} bytes, borrowed={})",
            self.len,
            new_count,
            self.buffer.len(),
            bytes,
            self.buffer.is_borrowed(),
        );
        self.buffer.reallocate(bytes);
        self.len = new_count;
        Ok(())
    }

    /// Deep copy into an array that owns its buffer.
    pub fn to_owned_array(&self) -> StructArray<'static> {
        StructArray {
            buffer: self.buffer.to_owned_buffer(),
            layout: Arc::clone(&self.layout),
            len: self.len,
        }
    }
}

impl fmt::Debug for StructArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructArray")
            .field("len", &self.len)
            .field("record_size", &self.layout.record_size())
            .field("borrowed", &self.buffer.is_borrowed())
            .finish()
    }
}
