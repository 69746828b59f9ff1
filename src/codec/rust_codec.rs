//! Pure Rust codec on the `image` crate — no system dependencies.
//!
//! Decoders and encoders are statically linked; the binary needs no
//! ImageMagick, no libjpeg, nothing installed. Format detection sniffs the
//! actual bytes rather than trusting a file extension.

use super::backend::{CodecError, ImageCodec, MAX_DECODE_SIDE};
use crate::analysis::FocalRegion;
use crate::options::{EncodeFormat, Quality};
use crate::raster::{BufferError, RasterBuffer};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::io::Cursor;

/// Codec built on the `image` crate's pure-Rust decoders and encoders.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Analysis decode dimensions: short side capped at `cap`, long side scaled
/// proportionally and floored. Never upscales.
fn capped_dimensions(width: u32, height: u32, cap: u32) -> (u32, u32) {
    let short = cap.min(width).min(height);
    if width <= height {
        let long = short as u64 * height as u64 / width as u64;
        (short, long as u32)
    } else {
        let long = short as u64 * width as u64 / height as u64;
        (long as u32, short)
    }
}

/// Rebuild an `image` buffer from our raster data model.
fn to_rgba_image(raster: &RasterBuffer) -> Result<RgbaImage, CodecError> {
    raster.validate()?;
    RgbaImage::from_raw(raster.width, raster.height, raster.data.clone()).ok_or_else(|| {
        CodecError::Buffer(BufferError::InvalidInput {
            width: raster.width,
            height: raster.height,
            expected: raster.width as usize * raster.height as usize * 4,
            actual: raster.data.len(),
        })
    })
}

impl ImageCodec for RustCodec {
    fn decode(&self, bytes: &[u8], max_side: Option<u32>) -> Result<RasterBuffer, CodecError> {
        if let Some(cap) = max_side {
            if cap >= MAX_DECODE_SIDE {
                return Err(CodecError::SizeLimitExceeded(cap));
            }
        }

        // Sniff before decoding so non-image bytes get a media-type error
        // rather than an opaque decoder failure.
        let format = image::guess_format(bytes)
            .map_err(|e| CodecError::UnsupportedMediaType(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(CodecError::Decode)?;
        let mut rgba = decoded.to_rgba8();

        if let Some(cap) = max_side {
            let (w, h) = rgba.dimensions();
            let (target_w, target_h) = capped_dimensions(w, h, cap);
            if (target_w, target_h) != (w, h) {
                rgba = image::imageops::resize(&rgba, target_w, target_h, FilterType::Lanczos3);
            }
        }

        let (width, height) = rgba.dimensions();
        Ok(RasterBuffer {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    fn resize_and_encode(
        &self,
        source: &RasterBuffer,
        crop: FocalRegion,
        output_side: u32,
        format: EncodeFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError> {
        let img = to_rgba_image(source)?;
        if crop.x as u64 + crop.side as u64 > source.width as u64
            || crop.y as u64 + crop.side as u64 > source.height as u64
        {
            return Err(CodecError::Buffer(BufferError::PreconditionViolation(
                format!(
                    "crop {crop:?} exceeds source bounds {}x{}",
                    source.width, source.height
                ),
            )));
        }

        let cropped = image::imageops::crop_imm(&img, crop.x, crop.y, crop.side, crop.side)
            .to_image();
        let scaled = if output_side != crop.side {
            image::imageops::resize(&cropped, output_side, output_side, FilterType::Lanczos3)
        } else {
            cropped
        };

        let mut out = Cursor::new(Vec::new());
        match format {
            EncodeFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = image::DynamicImage::ImageRgba8(scaled).to_rgb8();
                JpegEncoder::new_with_quality(&mut out, quality.value())
                    .write_image(
                        rgb.as_raw(),
                        output_side,
                        output_side,
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(CodecError::Encode)?;
            }
            EncodeFormat::Png => {
                PngEncoder::new(&mut out)
                    .write_image(
                        scaled.as_raw(),
                        output_side,
                        output_side,
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(CodecError::Encode)?;
            }
            EncodeFormat::WebP => {
                WebPEncoder::new_lossless(&mut out)
                    .write_image(
                        scaled.as_raw(),
                        output_side,
                        output_side,
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(CodecError::Encode)?;
            }
        }

        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;

    /// Encode a synthetic gradient as PNG bytes.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        let mut out = Cursor::new(Vec::new());
        PngEncoder::new(&mut out)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn capped_dimensions_scale_portrait() {
        assert_eq!(capped_dimensions(400, 800, 100), (100, 200));
    }

    #[test]
    fn capped_dimensions_scale_landscape() {
        assert_eq!(capped_dimensions(800, 400, 100), (200, 100));
    }

    #[test]
    fn capped_dimensions_floor_the_long_side() {
        // 100x301 capped at 50: long = floor(50 · 301 / 100) = 150
        assert_eq!(capped_dimensions(100, 301, 50), (50, 150));
    }

    #[test]
    fn capped_dimensions_never_upscale() {
        assert_eq!(capped_dimensions(40, 80, 256), (40, 80));
    }

    #[test]
    fn decode_full_resolution() {
        let codec = RustCodec::new();
        let raster = codec.decode(&png_bytes(20, 30), None).unwrap();
        assert_eq!((raster.width, raster.height), (20, 30));
        assert_eq!(raster.data.len(), 20 * 30 * 4);
    }

    #[test]
    fn decode_caps_the_short_side() {
        let codec = RustCodec::new();
        let raster = codec.decode(&png_bytes(40, 80), Some(10)).unwrap();
        assert_eq!((raster.width, raster.height), (10, 20));
    }

    #[test]
    fn decode_rejects_non_image_bytes() {
        let codec = RustCodec::new();
        let result = codec.decode(b"definitely not an image", Some(256));
        assert!(matches!(result, Err(CodecError::UnsupportedMediaType(_))));
    }

    #[test]
    fn decode_rejects_oversized_cap() {
        let codec = RustCodec::new();
        let result = codec.decode(&png_bytes(4, 4), Some(MAX_DECODE_SIDE));
        assert!(matches!(result, Err(CodecError::SizeLimitExceeded(65536))));
    }

    #[test]
    fn encode_round_trip_preserves_output_side() {
        let codec = RustCodec::new();
        let source = codec.decode(&png_bytes(40, 60), None).unwrap();
        let crop = FocalRegion {
            x: 0,
            y: 10,
            side: 40,
        };

        for format in [EncodeFormat::Jpeg, EncodeFormat::Png, EncodeFormat::WebP] {
            let bytes = codec
                .resize_and_encode(&source, crop, 16, format, Quality::default())
                .unwrap();
            let thumb = codec.decode(&bytes, None).unwrap();
            assert_eq!((thumb.width, thumb.height), (16, 16), "{format:?}");
        }
    }

    #[test]
    fn encode_rejects_out_of_bounds_crop() {
        let codec = RustCodec::new();
        let source = codec.decode(&png_bytes(20, 20), None).unwrap();
        let crop = FocalRegion {
            x: 10,
            y: 0,
            side: 20,
        };
        let result =
            codec.resize_and_encode(&source, crop, 8, EncodeFormat::Png, Quality::default());
        assert!(matches!(
            result,
            Err(CodecError::Buffer(BufferError::PreconditionViolation(_)))
        ));
    }

    #[test]
    fn encode_without_resize_when_sides_match() {
        let codec = RustCodec::new();
        let source = codec.decode(&png_bytes(12, 12), None).unwrap();
        let crop = FocalRegion {
            x: 0,
            y: 0,
            side: 12,
        };
        let bytes = codec
            .resize_and_encode(&source, crop, 12, EncodeFormat::Png, Quality::default())
            .unwrap();
        let thumb = codec.decode(&bytes, None).unwrap();
        assert_eq!((thumb.width, thumb.height), (12, 12));
        // PNG is lossless, so pixel data survives untouched.
        assert_eq!(thumb.data, source.data);
    }
}
