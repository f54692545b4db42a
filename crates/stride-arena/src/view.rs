//! Bounds-checked sliding-window views over a record buffer.
//!
//! A view binds a byte slice, a [`RecordLayout`] and a base offset. Moving
//! it to another record only changes the offset: no allocation, no copy.
//! Every field access recomputes `base_offset + field.offset()` and checks
//! the resulting byte range against the buffer's capacity, so a view can
//! never read or write outside the storage it borrows.
//!
//! [`StructView`] borrows the buffer shared and only reads;
//! [`StructViewMut`] borrows it exclusively and also writes. Both borrow
//! from the array, so a view cannot outlive the array or survive a
//! reallocation by `grow`.

use std::ops::Range;

use stride_core::{
    AccessError, EnumField, Field, FieldDef, RecordLayout, Scalar, StructEnum, Value,
};

fn checked_range(offset: usize, len: usize, capacity: usize) -> Result<Range<usize>, AccessError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(offset..end),
        _ => Err(AccessError::OutOfRange {
            offset,
            len,
            capacity,
        }),
    }
}

fn read_field<T: Scalar>(bytes: &[u8], base: usize, field: Field<T>) -> Result<T, AccessError> {
    let at = base.saturating_add(field.offset());
    let range = checked_range(at, field.width(), bytes.len())?;
    Ok(T::read_bytes(&bytes[range]))
}

fn read_value(bytes: &[u8], base: usize, def: &FieldDef) -> Result<Value, AccessError> {
    let range = field_range(base, def, bytes.len())?;
    Ok(Value::read(def.ty, &bytes[range]))
}

fn field_range(base: usize, def: &FieldDef, capacity: usize) -> Result<Range<usize>, AccessError> {
    checked_range(base.saturating_add(def.offset), def.width(), capacity)
}

fn read_enum<E: StructEnum>(
    bytes: &[u8],
    base: usize,
    field: EnumField<E>,
) -> Result<E, AccessError> {
    let ordinal = read_field(bytes, base, field.word())?;
    E::from_ordinal(ordinal).ok_or(AccessError::InvalidOrdinal { ordinal })
}

/// Validate that a whole record fits at `offset`.
fn check_record(offset: usize, layout: &RecordLayout, capacity: usize) -> Result<(), AccessError> {
    checked_range(offset, layout.record_size(), capacity).map(|_| ())
}

fn index_offset(
    index: usize,
    layout: &RecordLayout,
    capacity: usize,
) -> Result<usize, AccessError> {
    index
        .checked_mul(layout.record_size())
        .ok_or(AccessError::OutOfRange {
            offset: usize::MAX,
            len: layout.record_size(),
            capacity,
        })
}

/// Read-only, bounds-checked view of one record.
#[derive(Clone, Copy, Debug)]
pub struct StructView<'b> {
    bytes: &'b [u8],
    layout: &'b RecordLayout,
    base: usize,
}

impl<'b> StructView<'b> {
    /// Create a view positioned at byte offset `base`.
    ///
    /// Fails if a whole record does not fit at `base`.
    pub fn at(bytes: &'b [u8], layout: &'b RecordLayout, base: usize) -> Result<Self, AccessError> {
        check_record(base, layout, bytes.len())?;
        Ok(Self {
            bytes,
            layout,
            base,
        })
    }

    /// Create a view positioned at the first record.
    pub fn new(bytes: &'b [u8], layout: &'b RecordLayout) -> Result<Self, AccessError> {
        Self::at(bytes, layout, 0)
    }

    /// Move the view to byte offset `base`.
    ///
    /// On failure the view keeps its previous position.
    pub fn reposition(&mut self, base: usize) -> Result<(), AccessError> {
        check_record(base, self.layout, self.bytes.len())?;
        self.base = base;
        Ok(())
    }

    /// Move the view to record `index` (`index * record_size`).
    pub fn move_to(&mut self, index: usize) -> Result<(), AccessError> {
        let base = index_offset(index, self.layout, self.bytes.len())?;
        self.reposition(base)
    }

    /// Current byte offset of the record start.
    pub fn base_offset(&self) -> usize {
        self.base
    }

    /// Index of the record under the view.
    pub fn index(&self) -> usize {
        self.base / self.layout.record_size()
    }

    /// The layout this view interprets bytes with.
    pub fn layout(&self) -> &'b RecordLayout {
        self.layout
    }

    /// Capacity of the underlying buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Read a field.
    #[inline]
    pub fn get<T: Scalar>(&self, field: Field<T>) -> Result<T, AccessError> {
        read_field(self.bytes, self.base, field)
    }

    /// Read a field through its definition, without a typed handle.
    pub fn get_value(&self, def: &FieldDef) -> Result<Value, AccessError> {
        read_value(self.bytes, self.base, def)
    }

    /// Read an enum field.
    ///
    /// Fails with [`AccessError::InvalidOrdinal`] if the stored word names
    /// no variant of `E`.
    pub fn get_enum<E: StructEnum>(&self, field: EnumField<E>) -> Result<E, AccessError> {
        read_enum(self.bytes, self.base, field)
    }

    /// The stored bytes of one field of the current record, undecoded.
    pub fn field_bytes(&self, def: &FieldDef) -> Result<&'b [u8], AccessError> {
        let range = field_range(self.base, def, self.bytes.len())?;
        Ok(&self.bytes[range])
    }

    /// The bytes of the current record.
    pub fn record_bytes(&self) -> &'b [u8] {
        &self.bytes[self.base..self.base + self.layout.record_size()]
    }
}

/// Read-write, bounds-checked view of one record.
#[derive(Debug)]
pub struct StructViewMut<'b> {
    bytes: &'b mut [u8],
    layout: &'b RecordLayout,
    base: usize,
}

impl<'b> StructViewMut<'b> {
    /// Create a view positioned at byte offset `base`.
    ///
    /// Fails if a whole record does not fit at `base`.
    pub fn at(
        bytes: &'b mut [u8],
        layout: &'b RecordLayout,
        base: usize,
    ) -> Result<Self, AccessError> {
        check_record(base, layout, bytes.len())?;
        Ok(Self {
            bytes,
            layout,
            base,
        })
    }

    /// Create a view positioned at the first record.
    pub fn new(bytes: &'b mut [u8], layout: &'b RecordLayout) -> Result<Self, AccessError> {
        Self::at(bytes, layout, 0)
    }

    /// Move the view to byte offset `base`.
    ///
    /// On failure the view keeps its previous position.
    pub fn reposition(&mut self, base: usize) -> Result<(), AccessError> {
        check_record(base, self.layout, self.bytes.len())?;
        self.base = base;
        Ok(())
    }

    /// Move the view to record `index` (`index * record_size`).
    pub fn move_to(&mut self, index: usize) -> Result<(), AccessError> {
        let base = index_offset(index, self.layout, self.bytes.len())?;
        self.reposition(base)
    }

    /// Current byte offset of the record start, relative to the borrowed
    /// slice.
    ///
    /// Views handed to a parallel traversal borrow only their partition's
    /// bytes, so there this offset, [`index`](Self::index) and
    /// [`capacity`](Self::capacity) are partition-local. The traversal
    /// passes the global record index to the action separately.
    pub fn base_offset(&self) -> usize {
        self.base
    }

    /// Index of the record under the view, relative to the borrowed slice.
    pub fn index(&self) -> usize {
        self.base / self.layout.record_size()
    }

    /// The layout this view interprets bytes with.
    pub fn layout(&self) -> &'b RecordLayout {
        self.layout
    }

    /// Capacity of the underlying buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Read-only view at the same position.
    pub fn as_view(&self) -> StructView<'_> {
        StructView {
            bytes: self.bytes,
            layout: self.layout,
            base: self.base,
        }
    }

    /// Read a field.
    #[inline]
    pub fn get<T: Scalar>(&self, field: Field<T>) -> Result<T, AccessError> {
        read_field(self.bytes, self.base, field)
    }

    /// Write a field.
    #[inline]
    pub fn set<T: Scalar>(&mut self, field: Field<T>, value: T) -> Result<(), AccessError> {
        let at = self.base.saturating_add(field.offset());
        let range = checked_range(at, field.width(), self.bytes.len())?;
        value.write_bytes(&mut self.bytes[range]);
        Ok(())
    }

    /// Read-modify-write a field.
    pub fn update<T: Scalar>(
        &mut self,
        field: Field<T>,
        f: impl FnOnce(T) -> T,
    ) -> Result<(), AccessError> {
        let current = self.get(field)?;
        self.set(field, f(current))
    }

    /// Read a field through its definition, without a typed handle.
    pub fn get_value(&self, def: &FieldDef) -> Result<Value, AccessError> {
        read_value(self.bytes, self.base, def)
    }

    /// Write a field through its definition.
    ///
    /// The value's type must match the field's declared type.
    pub fn set_value(&mut self, def: &FieldDef, value: Value) -> Result<(), AccessError> {
        if value.ty() != def.ty {
            return Err(AccessError::TypeMismatch {
                declared: def.ty,
                supplied: value.ty(),
            });
        }
        let range = field_range(self.base, def, self.bytes.len())?;
        value.write(&mut self.bytes[range]);
        Ok(())
    }

    /// Read an enum field.
    pub fn get_enum<E: StructEnum>(&self, field: EnumField<E>) -> Result<E, AccessError> {
        read_enum(self.bytes, self.base, field)
    }

    /// Write an enum field as its ordinal.
    pub fn set_enum<E: StructEnum>(
        &mut self,
        field: EnumField<E>,
        value: E,
    ) -> Result<(), AccessError> {
        self.set(field.word(), value.to_ordinal())
    }

    /// The stored bytes of one field of the current record, undecoded.
    pub fn field_bytes(&self, def: &FieldDef) -> Result<&[u8], AccessError> {
        let range = field_range(self.base, def, self.bytes.len())?;
        Ok(&self.bytes[range])
    }

    /// The stored bytes of one field of the current record, writable.
    pub fn field_bytes_mut(&mut self, def: &FieldDef) -> Result<&mut [u8], AccessError> {
        let range = field_range(self.base, def, self.bytes.len())?;
        Ok(&mut self.bytes[range])
    }

    /// Overwrite one field with the same field's bytes under `source`,
    /// bit for bit.
    pub fn copy_field_from(
        &mut self,
        source: &StructView<'_>,
        def: &FieldDef,
    ) -> Result<(), AccessError> {
        let from = source.field_bytes(def)?;
        self.field_bytes_mut(def)?.copy_from_slice(from);
        Ok(())
    }

    /// The bytes of the current record.
    pub fn record_bytes(&self) -> &[u8] {
        &self.bytes[self.base..self.base + self.layout.record_size()]
    }

    /// The bytes of the current record, writable.
    pub fn record_bytes_mut(&mut self) -> &mut [u8] {
        let end = self.base + self.layout.record_size();
        &mut self.bytes[self.base..end]
    }

    /// Overwrite the current record with the record under `source`.
    ///
    /// Both layouts must have the same record size.
    pub fn copy_from(&mut self, source: &StructView<'_>) -> Result<(), AccessError> {
        let (source_size, target_size) = (source.layout.record_size(), self.layout.record_size());
        if source_size != target_size {
            return Err(AccessError::RecordSizeMismatch {
                source: source_size,
                target: target_size,
            });
        }
        self.record_bytes_mut().copy_from_slice(source.record_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::ScalarType;

    fn mixed() -> RecordLayout {
        RecordLayout::builder()
            .field("a", ScalarType::I32)
            .field("b", ScalarType::F32)
            .field("c", ScalarType::I64)
            .build()
            .unwrap()
    }

    #[test]
    fn write_then_read_each_slot() {
        let layout = mixed();
        let a = layout.field::<i32>("a").unwrap();
        let b = layout.field::<f32>("b").unwrap();
        let c = layout.field::<i64>("c").unwrap();
        let mut bytes = vec![0u8; layout.record_size() * 4];

        let mut view = StructViewMut::new(&mut bytes, &layout).unwrap();
        for i in 0..4 {
            view.move_to(i).unwrap();
            view.set(a, i as i32).unwrap();
            view.set(b, i as f32 * 0.5).unwrap();
            view.set(c, -(i as i64) << 40).unwrap();
        }

        let mut fresh = StructView::new(&bytes, &layout).unwrap();
        for i in 0..4 {
            fresh.move_to(i).unwrap();
            assert_eq!(fresh.index(), i);
            assert_eq!(fresh.get(a).unwrap(), i as i32);
            assert_eq!(fresh.get(b).unwrap(), i as f32 * 0.5);
            assert_eq!(fresh.get(c).unwrap(), -(i as i64) << 40);
        }
    }

    #[test]
    fn reposition_past_end_fails_and_keeps_position() {
        let layout = mixed();
        let mut bytes = vec![0u8; layout.record_size() * 2];
        let mut view = StructViewMut::new(&mut bytes, &layout).unwrap();
        view.move_to(1).unwrap();

        let err = view.reposition(20).unwrap_err();
        assert_eq!(
            err,
            AccessError::OutOfRange {
                offset: 20,
                len: 16,
                capacity: 32,
            }
        );
        assert_eq!(view.base_offset(), 16);
        assert!(view.move_to(2).is_err());
        assert!(view.reposition(usize::MAX).is_err());
    }

    #[test]
    fn unaligned_base_is_allowed_when_in_range() {
        let layout = mixed();
        let a = layout.field::<i32>("a").unwrap();
        let mut bytes = vec![0u8; 17];
        let mut view = StructViewMut::at(&mut bytes, &layout, 1).unwrap();
        view.set(a, 77).unwrap();
        assert_eq!(view.get(a).unwrap(), 77);
        assert_eq!(&bytes[1..5], &77i32.to_ne_bytes());
    }

    #[test]
    fn buffer_shorter_than_record_is_rejected() {
        let layout = mixed();
        let bytes = [0u8; 8];
        assert!(StructView::new(&bytes, &layout).is_err());
    }

    #[test]
    fn foreign_field_is_bounds_checked() {
        let small = RecordLayout::builder()
            .field("v", ScalarType::F32)
            .build()
            .unwrap();
        let wide = RecordLayout::builder()
            .field("pad", ScalarType::I64)
            .field("v", ScalarType::F32)
            .build()
            .unwrap();
        let far = wide.field::<f32>("v").unwrap();
        let bytes = [0u8; 4];
        let view = StructView::new(&bytes, &small).unwrap();
        assert!(matches!(
            view.get(far),
            Err(AccessError::OutOfRange { offset: 8, .. })
        ));
    }

    #[test]
    fn dynamic_access_checks_type() {
        let layout = mixed();
        let def = layout.field_def("b").unwrap().clone();
        let mut bytes = vec![0u8; layout.record_size()];
        let mut view = StructViewMut::new(&mut bytes, &layout).unwrap();

        view.set_value(&def, Value::F32(4.5)).unwrap();
        assert_eq!(view.get_value(&def).unwrap(), Value::F32(4.5));
        assert_eq!(
            view.set_value(&def, Value::I64(1)),
            Err(AccessError::TypeMismatch {
                declared: ScalarType::F32,
                supplied: ScalarType::I64,
            })
        );
    }

    #[test]
    fn update_applies_function() {
        let layout = mixed();
        let a = layout.field::<i32>("a").unwrap();
        let mut bytes = vec![0u8; layout.record_size()];
        let mut view = StructViewMut::new(&mut bytes, &layout).unwrap();
        view.update(a, |v| v + 3).unwrap();
        view.update(a, |v| v * 2).unwrap();
        assert_eq!(view.get(a).unwrap(), 6);
    }

    #[test]
    fn copy_record_between_views() {
        let layout = mixed();
        let c = layout.field::<i64>("c").unwrap();
        let mut src = vec![0u8; layout.record_size() * 2];
        {
            let mut v = StructViewMut::at(&mut src, &layout, 16).unwrap();
            v.set(c, 123).unwrap();
        }
        let mut dst = vec![0u8; layout.record_size()];
        let mut target = StructViewMut::new(&mut dst, &layout).unwrap();
        let source = StructView::at(&src, &layout, 16).unwrap();
        target.copy_from(&source).unwrap();
        assert_eq!(target.get(c).unwrap(), 123);

        let other = RecordLayout::builder()
            .field("x", ScalarType::F32)
            .build()
            .unwrap();
        let tiny = [0u8; 4];
        let mismatched = StructView::new(&tiny, &other).unwrap();
        assert_eq!(
            target.copy_from(&mismatched),
            Err(AccessError::RecordSizeMismatch {
                source: 4,
                target: 16,
            })
        );
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Phase {
        Idle,
        Running,
        Done,
    }

    impl StructEnum for Phase {
        fn to_ordinal(self) -> i32 {
            self as i32
        }

        fn from_ordinal(ordinal: i32) -> Option<Self> {
            match ordinal {
                0 => Some(Self::Idle),
                1 => Some(Self::Running),
                2 => Some(Self::Done),
                _ => None,
            }
        }
    }

    fn tagged() -> RecordLayout {
        RecordLayout::builder()
            .field("weight", ScalarType::F32)
            .field("phase", ScalarType::I32)
            .build()
            .unwrap()
    }

    #[test]
    fn enum_field_round_trips_as_ordinal() {
        let layout = tagged();
        let phase = layout.enum_field::<Phase>("phase").unwrap();
        let mut bytes = vec![0u8; layout.record_size() * 3];
        let mut view = StructViewMut::new(&mut bytes, &layout).unwrap();
        for (i, p) in [Phase::Done, Phase::Idle, Phase::Running].into_iter().enumerate() {
            view.move_to(i).unwrap();
            view.set_enum(phase, p).unwrap();
        }

        let mut read = StructView::new(&bytes, &layout).unwrap();
        read.move_to(2).unwrap();
        assert_eq!(read.get_enum(phase).unwrap(), Phase::Running);
        read.move_to(0).unwrap();
        assert_eq!(read.get_enum(phase).unwrap(), Phase::Done);
        assert_eq!(&bytes[4..8], &2i32.to_ne_bytes());
    }

    #[test]
    fn unknown_ordinal_is_an_access_error() {
        let layout = tagged();
        let phase = layout.enum_field::<Phase>("phase").unwrap();
        let mut bytes = vec![0u8; layout.record_size()];
        bytes[4..8].copy_from_slice(&7i32.to_ne_bytes());
        let view = StructView::new(&bytes, &layout).unwrap();
        assert_eq!(
            view.get_enum(phase),
            Err(AccessError::InvalidOrdinal { ordinal: 7 })
        );
        assert!(layout.enum_field::<Phase>("weight").is_err());
    }

    #[test]
    fn field_copy_is_bit_exact() {
        let layout = RecordLayout::builder()
            .field("alive", ScalarType::Bool)
            .build()
            .unwrap();
        let def = layout.field_def("alive").unwrap().clone();
        let src = 7u32.to_ne_bytes();
        let mut dst = [0u8; 4];
        let source = StructView::new(&src, &layout).unwrap();
        let mut target = StructViewMut::new(&mut dst, &layout).unwrap();
        target.copy_field_from(&source, &def).unwrap();
        assert_eq!(target.field_bytes(&def).unwrap(), &src);
        assert_eq!(source.get_value(&def).unwrap(), Value::Bool(false));
    }
}
