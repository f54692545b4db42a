//! Record layouts: frozen field offsets and the packed record size.
//!
//! A [`RecordLayout`] is built once per record type with a
//! [`RecordLayoutBuilder`] and then shared (typically behind an `Arc`) by
//! every array and view of that type. Offsets are assigned in declaration
//! order with no implicit alignment padding: the offset of field *i* is the
//! sum of the widths declared before it, and `record_size` is the sum of all
//! widths plus any padding the caller declared explicitly.

use indexmap::IndexMap;

use crate::error::LayoutError;
use crate::field::{Field, FieldDef, ScalarType};
use crate::ordinal::{EnumField, StructEnum};
use crate::scalar::Scalar;

/// Immutable description of one record type's fields and size.
///
/// Uses `IndexMap` keyed by field name so lookups are O(1) and iteration
/// follows declaration order, which is also ascending offset order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    fields: IndexMap<String, FieldDef>,
    record_size: usize,
}

impl RecordLayout {
    /// Start declaring a new layout.
    pub fn builder() -> RecordLayoutBuilder {
        RecordLayoutBuilder::new()
    }

    /// Size of one record in bytes, including declared padding.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Number of fields (nested fields counted individually).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a built layout; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Look up a field definition by name.
    pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Byte offset of the named field within a record.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.fields.get(name).map(|def| def.offset)
    }

    /// Resolve a typed accessor for the named field.
    ///
    /// Fails if the field does not exist or was declared with a type other
    /// than `T`.
    pub fn field<T: Scalar>(&self, name: &str) -> Result<Field<T>, LayoutError> {
        let def = self
            .fields
            .get(name)
            .ok_or_else(|| LayoutError::UnknownField { name: name.into() })?;
        if def.ty != T::TYPE {
            return Err(LayoutError::TypeMismatch {
                name: name.into(),
                declared: def.ty,
                requested: T::TYPE,
            });
        }
        Ok(Field::new(def.offset))
    }

    /// Resolve an enum accessor for the named field.
    ///
    /// The field must be declared as [`ScalarType::I32`]; it holds the
    /// variant's ordinal.
    pub fn enum_field<E: StructEnum>(&self, name: &str) -> Result<EnumField<E>, LayoutError> {
        self.field::<i32>(name)
            .map(|word| EnumField::new(word.offset()))
    }
}

/// Incremental declaration of a [`RecordLayout`].
///
/// Declaration methods consume and return the builder so layouts read as a
/// single expression. The first configuration error is remembered and
/// reported by [`build`](Self::build).
#[derive(Debug, Default)]
#[must_use]
pub struct RecordLayoutBuilder {
    fields: IndexMap<String, FieldDef>,
    cursor: usize,
    error: Option<LayoutError>,
}

impl RecordLayoutBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field of type `ty` at the current offset.
    pub fn field(mut self, name: impl Into<String>, ty: ScalarType) -> Self {
        let name = name.into();
        self.push(name, ty);
        self
    }

    /// Append `bytes` of explicit padding.
    pub fn padding(mut self, bytes: usize) -> Self {
        if bytes == 0 {
            self.fail(LayoutError::ZeroPadding);
        } else {
            self.advance(bytes);
        }
        self
    }

    /// Embed every field of `inner` at the current offset, named
    /// `prefix.field`. The cursor advances by `inner.record_size()`, so
    /// padding declared inside `inner` is kept.
    pub fn nested(mut self, prefix: &str, inner: &RecordLayout) -> Self {
        let base = self.cursor;
        for def in inner.fields() {
            let name = format!("{prefix}.{}", def.name);
            if prefix.is_empty() {
                self.fail(LayoutError::EmptyName);
            } else if self.fields.contains_key(&name) {
                self.fail(LayoutError::DuplicateField { name });
            } else {
                let offset = base + def.offset;
                self.fields.insert(
                    name.clone(),
                    FieldDef {
                        name,
                        ty: def.ty,
                        offset,
                    },
                );
            }
        }
        self.advance(inner.record_size());
        self
    }

    /// Freeze the offsets and produce the layout.
    pub fn build(self) -> Result<RecordLayout, LayoutError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.fields.is_empty() {
            return Err(LayoutError::Empty);
        }
        Ok(RecordLayout {
            fields: self.fields,
            record_size: self.cursor,
        })
    }

    fn push(&mut self, name: String, ty: ScalarType) {
        if name.is_empty() {
            self.fail(LayoutError::EmptyName);
            return;
        }
        if self.fields.contains_key(&name) {
            self.fail(LayoutError::DuplicateField { name });
            return;
        }
        let offset = self.cursor;
        self.fields.insert(name.clone(), FieldDef { name, ty, offset });
        self.advance(ty.width());
    }

    fn advance(&mut self, bytes: usize) {
        match self.cursor.checked_add(bytes) {
            Some(next) => self.cursor = next,
            None => self.fail(LayoutError::SizeOverflow),
        }
    }

    fn fail(&mut self, err: LayoutError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3() -> RecordLayout {
        RecordLayout::builder()
            .field("x", ScalarType::F32)
            .field("y", ScalarType::F32)
            .field("z", ScalarType::F32)
            .build()
            .unwrap()
    }

    #[test]
    fn vec3_offsets() {
        let layout = vec3();
        assert_eq!(layout.record_size(), 12);
        assert_eq!(layout.offset_of("x"), Some(0));
        assert_eq!(layout.offset_of("y"), Some(4));
        assert_eq!(layout.offset_of("z"), Some(8));
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn mixed_offsets() {
        let layout = RecordLayout::builder()
            .field("a", ScalarType::I32)
            .field("b", ScalarType::F32)
            .field("c", ScalarType::I64)
            .build()
            .unwrap();
        assert_eq!(layout.record_size(), 16);
        assert_eq!(layout.offset_of("c"), Some(8));
    }

    #[test]
    fn explicit_padding_counts() {
        let layout = RecordLayout::builder()
            .field("flag", ScalarType::Bool)
            .padding(4)
            .field("value", ScalarType::F64)
            .padding(8)
            .build()
            .unwrap();
        assert_eq!(layout.offset_of("value"), Some(8));
        assert_eq!(layout.record_size(), 24);
    }

    #[test]
    fn nested_layout_is_flattened() {
        let layout = RecordLayout::builder()
            .field("id", ScalarType::I32)
            .nested("position", &vec3())
            .field("alive", ScalarType::Bool)
            .build()
            .unwrap();
        assert_eq!(layout.record_size(), 20);
        assert_eq!(layout.offset_of("position.x"), Some(4));
        assert_eq!(layout.offset_of("position.z"), Some(12));
        assert_eq!(layout.offset_of("alive"), Some(16));
        let names: Vec<_> = layout.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["id", "position.x", "position.y", "position.z", "alive"]
        );
    }

    #[test]
    fn typed_field_checks_type() {
        let layout = vec3();
        let y = layout.field::<f32>("y").unwrap();
        assert_eq!(y.offset(), 4);
        assert_eq!(
            layout.field::<i32>("y"),
            Err(LayoutError::TypeMismatch {
                name: "y".into(),
                declared: ScalarType::F32,
                requested: ScalarType::I32,
            })
        );
        assert_eq!(
            layout.field::<f32>("w"),
            Err(LayoutError::UnknownField { name: "w".into() })
        );
    }

    #[test]
    fn configuration_errors() {
        assert_eq!(RecordLayout::builder().build(), Err(LayoutError::Empty));
        assert_eq!(
            RecordLayout::builder().padding(4).build(),
            Err(LayoutError::Empty)
        );
        assert_eq!(
            RecordLayout::builder()
                .field("a", ScalarType::I32)
                .field("a", ScalarType::F32)
                .build(),
            Err(LayoutError::DuplicateField { name: "a".into() })
        );
        assert_eq!(
            RecordLayout::builder().field("", ScalarType::I32).build(),
            Err(LayoutError::EmptyName)
        );
        assert_eq!(
            RecordLayout::builder()
                .field("a", ScalarType::I32)
                .padding(0)
                .build(),
            Err(LayoutError::ZeroPadding)
        );
    }

    #[test]
    fn first_error_wins() {
        let err = RecordLayout::builder()
            .padding(0)
            .field("", ScalarType::I32)
            .build()
            .unwrap_err();
        assert_eq!(err, LayoutError::ZeroPadding);
    }

    #[test]
    fn padding_overflow_detected() {
        let err = RecordLayout::builder()
            .field("a", ScalarType::I64)
            .padding(usize::MAX)
            .build()
            .unwrap_err();
        assert_eq!(err, LayoutError::SizeOverflow);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_type() -> impl Strategy<Value = ScalarType> {
            prop_oneof![
                Just(ScalarType::I32),
                Just(ScalarType::U32),
                Just(ScalarType::F32),
                Just(ScalarType::I64),
                Just(ScalarType::U64),
                Just(ScalarType::F64),
                Just(ScalarType::Bool),
            ]
        }

        proptest! {
            #[test]
            fn offsets_are_prefix_sums(types in proptest::collection::vec(arb_type(), 1..24)) {
                let mut builder = RecordLayout::builder();
                for (i, ty) in types.iter().enumerate() {
                    builder = builder.field(format!("f{i}"), *ty);
                }
                let layout = builder.build().unwrap();

                let mut expected = 0;
                for (i, ty) in types.iter().enumerate() {
                    prop_assert_eq!(layout.offset_of(&format!("f{i}")), Some(expected));
                    expected += ty.width();
                }
                prop_assert_eq!(layout.record_size(), expected);
            }
        }
    }
}
