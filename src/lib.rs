//! # focalcrop
//!
//! Entropy-guided square thumbnail cropping. Instead of cropping the
//! geometric center of a non-square image, the crate slides a square window
//! along the image's long axis, scores each position by the Shannon entropy
//! of its intensity histogram, and crops at the most detailed window.
//!
//! # Architecture
//!
//! ```text
//! decode (capped) → normalize orientation → grayscale → entropy scan
//!                                                            ↓
//! full decode     →     map focal region    →    crop + resize + encode
//! ```
//!
//! The expensive scan runs on a small *analysis* decode (short side capped,
//! 256 px by default); the winning offset is then scaled back onto the
//! full-resolution image, so analysis cost is decoupled from output quality.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raster`] | Buffer data model: RGBA [`RasterBuffer`], intensity [`GrayscaleBuffer`] |
//! | [`analysis`] | The pure core: transpose, entropy scan, focal-region mapping |
//! | [`codec`] | [`ImageCodec`] trait + the pure-Rust [`RustCodec`] on the `image` crate |
//! | [`options`] | [`ThumbnailOptions`] with clamped defaults |
//! | [`pipeline`] | [`generate_thumbnail`] orchestration + progress events |
//!
//! # Design Decisions
//!
//! ## Codec Behind a Trait
//!
//! The analysis core depends only on the buffer types, never on a concrete
//! codec: [`ImageCodec`] is the seam. Pipeline tests run against a
//! recording mock, so every orchestration path is exercised without
//! encoding a single real image.
//!
//! ## Entropy Over Saliency
//!
//! "Interesting" is defined purely as intensity-histogram entropy. No face
//! detection, no ML — the scan is deterministic, dependency-free, and cheap
//! enough to run on every upload.
//!
//! ## Orientation Normalization
//!
//! The scanner only ever walks the height axis. Landscape images are
//! transposed before analysis and the offset is mapped back to the x axis
//! afterwards, which keeps the scanner to a single code path over
//! contiguous rows.
//!
//! # Example
//!
//! ```no_run
//! use focalcrop::{RustCodec, ThumbnailOptions, generate_thumbnail};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("photo.jpg")?;
//! let thumb = generate_thumbnail(&RustCodec::new(), &bytes, &ThumbnailOptions::default(), None)?;
//! std::fs::write("photo-thumb.jpg", thumb)?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod codec;
pub mod options;
pub mod pipeline;
pub mod raster;

pub use analysis::{
    EntropyWindow, FocalRegion, compute_focal_crop, entropy_profile, map_focal_region,
    normalize_orientation, transpose,
};
pub use codec::{CodecError, ImageCodec, MAX_DECODE_SIDE, RustCodec};
pub use options::{EncodeFormat, Quality, ThumbnailOptions};
pub use pipeline::{PipelineEvent, ThumbnailError, generate_thumbnail};
pub use raster::{BufferError, GrayscaleBuffer, RasterBuffer};
