//! Scalar encodings and the dynamically-typed [`Value`].
//!
//! Each supported Rust type maps to a plain-old-data storage representation
//! (`Repr`) that is written to the buffer in native byte order. Booleans are
//! stored as a 32-bit word so every [`ScalarType`] has a `Pod` representation;
//! only the word `1` reads back as `true`.

use std::fmt;

use bytemuck::Pod;

use crate::field::ScalarType;

mod sealed {
    pub trait Sealed {}
}

/// A Rust type that can be stored in a record field.
///
/// Sealed: implemented for `i32`, `u32`, `f32`, `i64`, `u64`, `f64` and `bool`.
pub trait Scalar: Copy + Send + Sync + 'static + sealed::Sealed {
    /// The layout type this Rust type reads and writes.
    const TYPE: ScalarType;

    /// Storage representation in the buffer.
    type Repr: Pod;

    /// Convert into the storage representation.
    fn to_repr(self) -> Self::Repr;

    /// Convert from the storage representation.
    fn from_repr(repr: Self::Repr) -> Self;

    /// Wrap into a dynamically-typed [`Value`].
    fn into_value(self) -> Value;

    /// Unwrap a [`Value`] of the matching type.
    fn from_value(value: Value) -> Option<Self>;

    /// Decode from exactly `TYPE.width()` bytes (any alignment).
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` differs from the type's width.
    fn read_bytes(bytes: &[u8]) -> Self {
        Self::from_repr(bytemuck::pod_read_unaligned(bytes))
    }

    /// Encode into exactly `TYPE.width()` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` differs from the type's width.
    fn write_bytes(self, bytes: &mut [u8]) {
        bytes.copy_from_slice(bytemuck::bytes_of(&self.to_repr()));
    }
}

macro_rules! pod_scalar {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const TYPE: ScalarType = ScalarType::$variant;
            type Repr = $ty;

            #[inline]
            fn to_repr(self) -> Self::Repr {
                self
            }

            #[inline]
            fn from_repr(repr: Self::Repr) -> Self {
                repr
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

pod_scalar!(i32, I32);
pod_scalar!(u32, U32);
pod_scalar!(f32, F32);
pod_scalar!(i64, I64);
pod_scalar!(u64, U64);
pod_scalar!(f64, F64);

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const TYPE: ScalarType = ScalarType::Bool;
    type Repr = u32;

    #[inline]
    fn to_repr(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_repr(repr: u32) -> Self {
        repr == 1
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

/// A field value whose type is only known at runtime.
///
/// Used by name-driven access and field-wise copy, where the caller walks a
/// layout's [`FieldDef`](crate::FieldDef)s instead of holding typed handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// 32-bit float.
    F32(f32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit float.
    F64(f64),
    /// Boolean.
    Bool(bool),
}

impl Value {
    /// The scalar type carried by this value.
    pub fn ty(&self) -> ScalarType {
        match self {
            Self::I32(_) => ScalarType::I32,
            Self::U32(_) => ScalarType::U32,
            Self::F32(_) => ScalarType::F32,
            Self::I64(_) => ScalarType::I64,
            Self::U64(_) => ScalarType::U64,
            Self::F64(_) => ScalarType::F64,
            Self::Bool(_) => ScalarType::Bool,
        }
    }

    /// Decode a value of type `ty` from exactly `ty.width()` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` differs from `ty.width()`.
    pub fn read(ty: ScalarType, bytes: &[u8]) -> Self {
        match ty {
            ScalarType::I32 => i32::read_bytes(bytes).into_value(),
            ScalarType::U32 => u32::read_bytes(bytes).into_value(),
            ScalarType::F32 => f32::read_bytes(bytes).into_value(),
            ScalarType::I64 => i64::read_bytes(bytes).into_value(),
            ScalarType::U64 => u64::read_bytes(bytes).into_value(),
            ScalarType::F64 => f64::read_bytes(bytes).into_value(),
            ScalarType::Bool => bool::read_bytes(bytes).into_value(),
        }
    }

    /// Encode into exactly `self.ty().width()` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` differs from the value's width.
    pub fn write(self, bytes: &mut [u8]) {
        match self {
            Self::I32(v) => v.write_bytes(bytes),
            Self::U32(v) => v.write_bytes(bytes),
            Self::F32(v) => v.write_bytes(bytes),
            Self::I64(v) => v.write_bytes(bytes),
            Self::U64(v) => v.write_bytes(bytes),
            Self::F64(v) => v.write_bytes(bytes),
            Self::Bool(v) => v.write_bytes(bytes),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}i32"),
            Self::U32(v) => write!(f, "{v}u32"),
            Self::F32(v) => write!(f, "{v}f32"),
            Self::I64(v) => write!(f, "{v}i64"),
            Self::U64(v) => write!(f, "{v}u64"),
            Self::F64(v) => write!(f, "{v}f64"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}
