//! Thumbnail configuration types.
//!
//! These describe *what* to produce, not *how*: the pipeline turns them into
//! codec calls. Out-of-range values are substituted with defaults rather
//! than rejected — the one exception is the hard analysis-size ceiling,
//! which the pipeline rejects before touching the codec.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Output encoding for the finished thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    #[default]
    Jpeg,
    Png,
    /// Lossless; the quality setting is ignored.
    WebP,
}

impl EncodeFormat {
    pub fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "jpg",
            EncodeFormat::Png => "png",
            EncodeFormat::WebP => "webp",
        }
    }
}

/// Configuration for [`generate_thumbnail`](crate::pipeline::generate_thumbnail).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailOptions {
    /// Target square side of the output, in pixels. `0` falls back to 512.
    pub output_size: u32,
    /// Cap on the analysis decode's short side, in pixels. `0` falls back
    /// to 256. Bounds the entropy scan's cost; independent of the output
    /// resolution. Values at or above 65536 are rejected outright.
    pub input_size: u32,
    pub format: EncodeFormat,
    pub quality: Quality,
}

pub const DEFAULT_OUTPUT_SIZE: u32 = 512;
pub const DEFAULT_INPUT_SIZE: u32 = 256;

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            output_size: DEFAULT_OUTPUT_SIZE,
            input_size: DEFAULT_INPUT_SIZE,
            format: EncodeFormat::default(),
            quality: Quality::default(),
        }
    }
}

impl ThumbnailOptions {
    /// Effective output side after default substitution.
    pub fn effective_output_size(&self) -> u32 {
        if self.output_size == 0 {
            DEFAULT_OUTPUT_SIZE
        } else {
            self.output_size
        }
    }

    /// Effective analysis cap after default substitution. The 65536 ceiling
    /// is not handled here — that is a rejection, not a substitution.
    pub fn effective_input_size(&self) -> u32 {
        if self.input_size == 0 {
            DEFAULT_INPUT_SIZE
        } else {
            self.input_size
        }
    }
}
