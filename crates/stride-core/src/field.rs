//! Field definitions, scalar types, and the typed [`Field`] accessor token.

use std::fmt;
use std::marker::PhantomData;

use crate::scalar::Scalar;

/// Semantic type of a record field.
///
/// Every type has a fixed byte width; records are packed, so a field's
/// width is exactly the number of bytes it occupies in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// 32-bit IEEE float.
    F32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
    /// 64-bit IEEE float.
    F64,
    /// Boolean stored as a 32-bit word (`0` or `1`).
    Bool,
}

impl ScalarType {
    /// Returns the number of bytes one value of this type occupies.
    pub const fn width(self) -> usize {
        match self {
            Self::I32 | Self::U32 | Self::F32 | Self::Bool => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// Short lowercase name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F64 => "f64",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field registered in a [`RecordLayout`](crate::RecordLayout).
///
/// Offsets are frozen when the layout is built and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name. Nested fields use a dotted path (`position.x`).
    pub name: String,
    /// Semantic type, which also fixes the width.
    pub ty: ScalarType,
    /// Byte offset from the start of the record.
    pub offset: usize,
}

impl FieldDef {
    /// Width of this field in bytes.
    pub fn width(&self) -> usize {
        self.ty.width()
    }

    /// One past the last byte of this field, relative to the record start.
    pub fn end(&self) -> usize {
        self.offset + self.width()
    }
}

/// Typed, copyable handle for one field of a layout.
///
/// Obtained from [`RecordLayout::field`](crate::RecordLayout::field), which
/// checks that the declared type matches `T`. Views use the handle's offset
/// directly, so resolving a field by name happens once and never on the
/// access path.
#[must_use]
pub struct Field<T> {
    offset: usize,
    _ty: PhantomData<fn() -> T>,
}

impl<T: Scalar> Field<T> {
    pub(crate) fn new(offset: usize) -> Self {
        Self {
            offset,
            _ty: PhantomData,
        }
    }

    /// Byte offset of the field within its record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Width of the field in bytes.
    pub fn width(&self) -> usize {
        T::TYPE.width()
    }

    /// Semantic type of the field.
    pub fn ty(&self) -> ScalarType {
        T::TYPE
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<T> Eq for Field<T> {}

impl<T: Scalar> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("ty", &T::TYPE)
            .field("offset", &self.offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_storage() {
        assert_eq!(ScalarType::I32.width(), 4);
        assert_eq!(ScalarType::F32.width(), 4);
        assert_eq!(ScalarType::Bool.width(), 4);
        assert_eq!(ScalarType::I64.width(), 8);
        assert_eq!(ScalarType::F64.width(), 8);
        assert_eq!(ScalarType::U64.width(), 8);
    }

    #[test]
    fn field_def_end() {
        let def = FieldDef {
            name: "c".into(),
            ty: ScalarType::I64,
            offset: 8,
        };
        assert_eq!(def.width(), 8);
        assert_eq!(def.end(), 16);
    }

    #[test]
    fn typed_field_reports_type() {
        let f: Field<f32> = Field::new(4);
        assert_eq!(f.offset(), 4);
        assert_eq!(f.width(), 4);
        assert_eq!(f.ty(), ScalarType::F32);
        assert_eq!(f, f.clone());
    }
}
