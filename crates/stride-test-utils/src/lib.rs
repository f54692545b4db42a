//! Test utilities and record shapes for Stride development.
//!
//! Provides the two record shapes used throughout the workspace tests and
//! benches, typed accessor bundles for them, and byte-comparison helpers.
//! Seeded fills live in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Arc;

use stride_core::{Field, LayoutError, RecordLayout, ScalarType};

/// `{ x: f32, y: f32, z: f32 }`, 12 bytes.
pub fn vec3_layout() -> Arc<RecordLayout> {
    let layout = RecordLayout::builder()
        .field("x", ScalarType::F32)
        .field("y", ScalarType::F32)
        .field("z", ScalarType::F32)
        .build()
        .expect("vec3 layout is valid");
    Arc::new(layout)
}

/// `{ a: i32, b: f32, c: i64 }`, 16 bytes.
pub fn mixed_layout() -> Arc<RecordLayout> {
    let layout = RecordLayout::builder()
        .field("a", ScalarType::I32)
        .field("b", ScalarType::F32)
        .field("c", ScalarType::I64)
        .build()
        .expect("mixed layout is valid");
    Arc::new(layout)
}

/// Typed handles for [`vec3_layout`].
#[derive(Clone, Copy, Debug)]
pub struct Vec3Fields {
    pub x: Field<f32>,
    pub y: Field<f32>,
    pub z: Field<f32>,
}

impl Vec3Fields {
    pub fn resolve(layout: &RecordLayout) -> Result<Self, LayoutError> {
        Ok(Self {
            x: layout.field("x")?,
            y: layout.field("y")?,
            z: layout.field("z")?,
        })
    }
}

/// Typed handles for [`mixed_layout`].
#[derive(Clone, Copy, Debug)]
pub struct MixedFields {
    pub a: Field<i32>,
    pub b: Field<f32>,
    pub c: Field<i64>,
}

impl MixedFields {
    pub fn resolve(layout: &RecordLayout) -> Result<Self, LayoutError> {
        Ok(Self {
            a: layout.field("a")?,
            b: layout.field("b")?,
            c: layout.field("c")?,
        })
    }
}

/// Index of the first differing byte, or `None` if `a` and `b` are equal.
///
/// A length difference counts as a difference at the shorter length.
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

/// Panics with the first differing record if `a` and `b` differ.
pub fn assert_records_eq(a: &[u8], b: &[u8], record_size: usize) {
    if let Some(at) = first_difference(a, b) {
        panic!(
            "buffers differ at byte {at} (record {}, offset {})",
            at / record_size,
            at % record_size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_have_expected_sizes() {
        assert_eq!(vec3_layout().record_size(), 12);
        assert_eq!(mixed_layout().record_size(), 16);
        let fields = MixedFields::resolve(&mixed_layout()).unwrap();
        assert_eq!(fields.c.offset(), 8);
    }

    #[test]
    fn first_difference_finds_mismatch() {
        assert_eq!(first_difference(&[1, 2, 3], &[1, 2, 3]), None);
        assert_eq!(first_difference(&[1, 2, 3], &[1, 9, 3]), Some(1));
        assert_eq!(first_difference(&[1, 2], &[1, 2, 3]), Some(2));
    }
}
