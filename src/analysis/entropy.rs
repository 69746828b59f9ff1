//! Sliding-window Shannon entropy scan.
//!
//! A square window of side `width` slides down the height axis one row at a
//! time. Each window scores the Shannon entropy of its 256-bucket intensity
//! histogram; the window with the highest entropy wins, earliest offset on
//! ties. This is the pipeline's computational bottleneck: O(width²) per
//! window over O(height − width) windows, bounded in practice by the
//! analysis-size cap in [`ThumbnailOptions`](crate::options::ThumbnailOptions).

use crate::raster::GrayscaleBuffer;
use serde::Serialize;

/// One scanned window position and its score.
///
/// `offset` is the 0-based row along the long axis where the square window
/// begins; `entropy` is in bits, `0.0` for a single-valued window up to
/// `8.0` for a perfectly uniform 256-value histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropyWindow {
    pub offset: u32,
    pub entropy: f64,
}

/// Shannon entropy of the `side²` bytes starting at row `offset`.
///
/// The window is a contiguous byte run only because the buffer is row-major
/// and the window side equals the buffer width.
fn window_entropy(gray: &GrayscaleBuffer, offset: u32) -> f64 {
    let side = gray.width() as usize;
    let pixels = side * side;
    let start = offset as usize * side;
    let window = &gray.data()[start..start + pixels];

    let mut histogram = [0u32; 256];
    for &value in window {
        histogram[value as usize] += 1;
    }

    let n = pixels as f64;
    let mut entropy = 0.0;
    for &count in histogram.iter() {
        // Zero buckets contribute nothing; skipping them also keeps log2
        // away from zero probabilities.
        if count == 0 {
            continue;
        }
        let p = count as f64 / n;
        entropy -= p * p.log2();
    }
    entropy
}

/// Find the window offset with maximal entropy.
///
/// A square buffer has exactly one window, so it is scored and returned
/// immediately without scanning. Otherwise every offset in
/// `0..=height-width` is scored; a strictly higher entropy replaces the
/// best, so ties keep the smallest offset.
pub fn compute_focal_crop(gray: &GrayscaleBuffer) -> EntropyWindow {
    if gray.width() == gray.height() {
        return EntropyWindow {
            offset: 0,
            entropy: window_entropy(gray, 0),
        };
    }

    let mut best = EntropyWindow {
        offset: 0,
        entropy: window_entropy(gray, 0),
    };
    for offset in 1..=(gray.height() - gray.width()) {
        let entropy = window_entropy(gray, offset);
        if entropy > best.entropy {
            best = EntropyWindow { offset, entropy };
        }
    }
    best
}

/// Score every window, in offset order.
///
/// Diagnostic counterpart to [`compute_focal_crop`] — the CLI serializes
/// this to JSON so a scan can be inspected window by window.
pub fn entropy_profile(gray: &GrayscaleBuffer) -> Vec<EntropyWindow> {
    (0..=(gray.height() - gray.width()))
        .map(|offset| EntropyWindow {
            offset,
            entropy: window_entropy(gray, offset),
        })
        .collect()
}
