//! Record layouts and scalar field types for Stride struct arrays.
//!
//! This is the leaf crate with zero internal dependencies. It defines how a
//! fixed-shape record is laid out in bytes: the [`RecordLayout`] with its
//! frozen field offsets, the [`Scalar`] encodings used to read and write
//! fields, typed [`Field`] and [`EnumField`] handles, and the error types
//! shared by the higher-level crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod layout;
pub mod ordinal;
pub mod scalar;

pub use error::{AccessError, LayoutError};
pub use field::{Field, FieldDef, ScalarType};
pub use layout::{RecordLayout, RecordLayoutBuilder};
pub use ordinal::{EnumField, StructEnum};
pub use scalar::{Scalar, Value};
