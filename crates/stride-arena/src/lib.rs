//! Contiguous record storage and sliding-window views for Stride.
//!
//! Provides the [`StructArray`] container and the two view tiers used to
//! read and write its records in place. This crate is the only one in the
//! workspace that may contain `unsafe` code, confined to `raw.rs`.
//!
//! # Architecture
//!
//! ```text
//! StructArray<'a> (len records of one layout)
//! ├── Buffer<'a>           Owned(Vec<u8>) | Borrowed(&'a mut [u8])
//! ├── Arc<RecordLayout>    shared by every array of the record type
//! └── views (transient, never stored in the array)
//!     ├── StructView / StructViewMut   bounds-checked, borrow the buffer
//!     └── RawView                      raw address + offset, unchecked
//! ```
//!
//! # Access tiers
//!
//! - **Checked:** [`StructView`] and [`StructViewMut`] validate every
//!   reposition and every field access against the buffer capacity and
//!   report [`AccessError`](stride_core::AccessError). They borrow the array,
//!   so the compiler rejects a view held across `grow`.
//! - **Raw:** [`RawView`] precomputes nothing but an address and an offset.
//!   Its `get`/`set` are `unsafe fn`: range, liveness and exclusivity are
//!   caller obligations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod buffer;
pub mod error;
mod raw;
pub mod view;

// Public re-exports for the primary API surface.
pub use array::StructArray;
pub use buffer::Buffer;
pub use error::ArrayError;
pub use raw::RawView;
pub use view::{StructView, StructViewMut};
