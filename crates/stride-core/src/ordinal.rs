//! Enum-valued fields stored as `i32` ordinals.
//!
//! An enum field is declared in the layout as a plain [`ScalarType::I32`]
//! word holding the variant's ordinal, so raw copies, dynamic access and
//! field-wise copies treat it like any other 4-byte integer. The typed
//! [`EnumField`] handle adds the conversion on top.

use std::fmt;
use std::marker::PhantomData;

use crate::field::{Field, ScalarType};

/// A fieldless enum that can be stored in a record as its ordinal.
///
/// The ordinal is the variant's zero-based declaration index.
/// `from_ordinal` returns `None` for any value that names no variant, which
/// views report as [`AccessError::InvalidOrdinal`](crate::AccessError::InvalidOrdinal).
///
/// ```
/// use stride_core::StructEnum;
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Phase { Idle, Running, Done }
///
/// impl StructEnum for Phase {
///     fn to_ordinal(self) -> i32 {
///         self as i32
///     }
///
///     fn from_ordinal(ordinal: i32) -> Option<Self> {
///         match ordinal {
///             0 => Some(Self::Idle),
///             1 => Some(Self::Running),
///             2 => Some(Self::Done),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Phase::from_ordinal(Phase::Done.to_ordinal()), Some(Phase::Done));
/// assert_eq!(Phase::from_ordinal(3), None);
/// ```
pub trait StructEnum: Copy + Send + Sync + 'static {
    /// Ordinal written to the buffer.
    fn to_ordinal(self) -> i32;

    /// Variant for a stored ordinal, or `None` if out of range.
    fn from_ordinal(ordinal: i32) -> Option<Self>;
}

/// Typed, copyable handle for an enum field.
///
/// Obtained from [`RecordLayout::enum_field`](crate::RecordLayout::enum_field).
#[must_use]
pub struct EnumField<E> {
    word: Field<i32>,
    _ty: PhantomData<fn() -> E>,
}

impl<E: StructEnum> EnumField<E> {
    pub(crate) fn new(offset: usize) -> Self {
        Self {
            word: Field::new(offset),
            _ty: PhantomData,
        }
    }

    /// Byte offset of the field within its record.
    pub fn offset(&self) -> usize {
        self.word.offset()
    }

    /// The underlying ordinal word, for raw access.
    pub fn word(&self) -> Field<i32> {
        self.word
    }

    /// Storage type of the ordinal.
    pub fn ty(&self) -> ScalarType {
        ScalarType::I32
    }
}

impl<E> Clone for EnumField<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumField<E> {}

impl<E> PartialEq for EnumField<E> {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl<E> Eq for EnumField<E> {}

impl<E> fmt::Debug for EnumField<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumField")
            .field("enum", &std::any::type_name::<E>())
            .field("offset", &self.word.offset())
            .finish()
    }
}
