//! Image codec boundary — the only part of the crate that touches encoded
//! bytes.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff format** | `image::guess_format` |
//! | **Decode (JPEG, PNG, TIFF, WebP)** | `image` crate (pure Rust decoders) |
//! | **Downscale / crop-resize** | Lanczos3 via `image::imageops` |
//! | **Encode (JPEG, PNG, lossless WebP)** | `image` codecs |
//!
//! The analysis core never sees these types: it depends only on
//! [`RasterBuffer`](crate::raster::RasterBuffer), so it is testable without
//! a real codec (see `MockCodec` in the backend tests).

pub mod backend;
pub mod rust_codec;

pub use backend::{CodecError, ImageCodec, MAX_DECODE_SIDE};
pub use rust_codec::RustCodec;
