//! The pure analysis core — no I/O, no codec types, fully unit testable.
//!
//! | Stage | Function |
//! |---|---|
//! | **Orientation** | [`transpose`], [`normalize_orientation`] |
//! | **Intensity** | [`GrayscaleBuffer::from_raster`](crate::raster::GrayscaleBuffer::from_raster) |
//! | **Entropy scan** | [`compute_focal_crop`], [`entropy_profile`] |
//! | **Crop mapping** | [`map_focal_region`] |
//!
//! Everything here operates on the buffer types in [`raster`](crate::raster)
//! and is synchronous and deterministic: the same input always produces the
//! same output, so nothing is ever retried.

mod entropy;
mod focal;
mod transpose;

pub use entropy::{EntropyWindow, compute_focal_crop, entropy_profile};
pub use focal::{FocalRegion, map_focal_region};
pub use transpose::{normalize_orientation, transpose};
