//! Pixel buffer data model shared by every pipeline stage.
//!
//! Two buffer types flow through the pipeline:
//!
//! - [`RasterBuffer`] — RGBA, 4 bytes per pixel, row-major. Produced by the
//!   codec, consumed by the orientation/grayscale stages.
//! - [`GrayscaleBuffer`] — one intensity byte per pixel, always at least as
//!   tall as wide. Produced by grayscale reduction, consumed by the entropy
//!   scanner. The `width <= height` invariant is enforced at construction so
//!   the scanner never has to re-check it.
//!
//! No stage mutates a buffer in place; every transform returns a new one.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BufferError {
    /// Declared dimensions disagree with the data length.
    #[error("invalid buffer: {width}x{height} declares {expected} bytes, data holds {actual}")]
    InvalidInput {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// A stage that requires `width <= height` was handed a wider-than-tall
    /// buffer. Callers must transpose first; this is a programming error.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

/// In-memory RGBA pixel grid, row-major, 4 bytes per pixel.
///
/// Fields are public — this is pure data, owned by whichever stage produced
/// it. Consumers that index into `data` call [`validate`](Self::validate)
/// first so a dimension/length mismatch surfaces as [`BufferError`] instead
/// of a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterBuffer {
    /// Build a buffer, checking that `data` holds exactly `width*height*4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let buffer = Self {
            width,
            height,
            data,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Check the dimensions-vs-data-length invariant.
    pub fn validate(&self) -> Result<(), BufferError> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(BufferError::InvalidInput {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Single-channel intensity buffer with `width <= height`.
///
/// Constructed only through [`from_raster`](Self::from_raster) or
/// [`from_raw`](Self::from_raw), both of which enforce the orientation
/// invariant, so holding a `GrayscaleBuffer` is proof the scan axis is the
/// height axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayscaleBuffer {
    /// Reduce an RGBA buffer to per-pixel intensities.
    ///
    /// Each output byte is the rounded mean of the three color channels;
    /// alpha is dropped. The input must already be orientation-normalized
    /// (`width <= height`) — see [`normalize_orientation`].
    ///
    /// [`normalize_orientation`]: crate::analysis::normalize_orientation
    pub fn from_raster(raster: &RasterBuffer) -> Result<Self, BufferError> {
        raster.validate()?;
        if raster.width > raster.height {
            return Err(BufferError::PreconditionViolation(format!(
                "grayscale reduction requires width <= height, got {}x{} (transpose first)",
                raster.width, raster.height
            )));
        }

        let data = raster
            .data
            .chunks_exact(4)
            .map(|px| {
                let sum = px[0] as u16 + px[1] as u16 + px[2] as u16;
                // Rounded mean. Thirds never land on .5, so +1 before the
                // division rounds 2/3 up and 1/3 down, matching round(sum/3).
                ((sum + 1) / 3) as u8
            })
            .collect();

        Ok(Self {
            width: raster.width,
            height: raster.height,
            data,
        })
    }

    /// Build a grayscale buffer directly from intensity bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(BufferError::InvalidInput {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        if width > height {
            return Err(BufferError::PreconditionViolation(format!(
                "grayscale buffer requires width <= height, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
