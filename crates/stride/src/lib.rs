//! Stride: flyweight views over packed arrays of fixed-shape records.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Stride sub-crates. For most users, adding `stride` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use stride::prelude::*;
//!
//! // A 12-byte record: { x: f32, y: f32, z: f32 }.
//! let layout = Arc::new(
//!     RecordLayout::builder()
//!         .field("x", ScalarType::F32)
//!         .field("y", ScalarType::F32)
//!         .field("z", ScalarType::F32)
//!         .build()
//!         .unwrap(),
//! );
//! let x = layout.field::<f32>("x").unwrap();
//! let z = layout.field::<f32>("z").unwrap();
//!
//! let mut points = StructArray::zeroed(Arc::clone(&layout), 1000).unwrap();
//! for_each(&mut points, |i, p| {
//!     p.set(x, i as f32)?;
//!     p.update(z, |v| v + 3.0)
//! })
//! .unwrap();
//!
//! let executor = Executor::new(ExecutorConfig::with_workers(2)).unwrap();
//! executor
//!     .for_each(&mut points, Traversal::Parallel, |_, p| p.update(x, |v| v * 2.0))
//!     .unwrap();
//! assert_eq!(points.get(10).unwrap().get(x).unwrap(), 20.0);
//!
//! points.grow(2000).unwrap();
//! let mut copy = StructArray::zeroed(layout, 2000).unwrap();
//! copy_to(&points, &mut copy, CopyMode::Raw).unwrap();
//! assert_eq!(copy.get(999).unwrap().get(z).unwrap(), 3.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stride-core` | Scalar types, field handles, record layouts, access errors |
//! | [`arena`] | `stride-arena` | `StructArray`, buffers, safe and raw views |
//! | [`engine`] | `stride-engine` | Sequential and parallel traversal, bulk copy |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Record layouts and scalar types (`stride-core`).
///
/// Build a [`types::RecordLayout`] once and resolve typed
/// [`types::Field`] handles from it.
pub use stride_core as types;

/// Record storage and views (`stride-arena`).
///
/// [`arena::StructArray`] owns or borrows the bytes;
/// [`arena::StructView`], [`arena::StructViewMut`] and [`arena::RawView`]
/// read and write them in place.
pub use stride_arena as arena;

/// Traversal and bulk copy (`stride-engine`).
///
/// [`engine::Executor`] runs partitioned parallel passes;
/// [`engine::copy_to`] moves records between arrays.
pub use stride_engine as engine;

/// Common imports for typical Stride usage.
///
/// ```rust
/// use stride::prelude::*;
/// ```
pub mod prelude {
    // Layouts
    pub use stride_core::{
        EnumField, Field, FieldDef, RecordLayout, RecordLayoutBuilder, ScalarType, StructEnum,
        Value,
    };

    // Arrays and views
    pub use stride_arena::{RawView, StructArray, StructView, StructViewMut};

    // Engine
    pub use stride_engine::{
        copy_to, for_each, for_each_raw, CopyMode, Executor, ExecutorConfig, Traversal,
    };

    // Errors
    pub use stride_arena::ArrayError;
    pub use stride_core::{AccessError, LayoutError};
    pub use stride_engine::EngineError;
}
