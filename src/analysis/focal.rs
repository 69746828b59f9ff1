//! Mapping the entropy scan result back into source-image coordinates.
//!
//! The scan runs on a downscaled, orientation-normalized copy of the image,
//! so its offset lives in analysis pixels along the normalized height axis.
//! [`map_focal_region`] scales that offset up to the original resolution and
//! un-applies the transpose, producing the square to crop from the source.

use crate::raster::BufferError;
use serde::Serialize;

/// The square to crop, in original untransposed full-resolution coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocalRegion {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Map an analysis-space scan offset onto the original image.
///
/// `original` are the full-resolution dimensions (width, height) before any
/// transpose; `analysis` are the normalized analysis dimensions (so
/// `analysis.0 <= analysis.1`); `transposed` says whether orientation
/// normalization flipped the axes. The crop side is always the original's
/// short axis, and the offset is floor-scaled by the long-axis ratio.
///
/// The analysis buffer is assumed to be a uniform downscale of the original;
/// that assumption is checked here (one pixel of rounding tolerance) rather
/// than trusted, and a mismatch is a `PreconditionViolation`.
pub fn map_focal_region(
    original: (u32, u32),
    analysis: (u32, u32),
    transposed: bool,
    offset: u32,
) -> Result<FocalRegion, BufferError> {
    let (orig_w, orig_h) = original;
    let (norm_w, norm_h) = analysis;
    if orig_w == 0 || orig_h == 0 || norm_w == 0 || norm_h == 0 {
        return Err(BufferError::PreconditionViolation(format!(
            "cannot map a focal region for empty dimensions {orig_w}x{orig_h} / {norm_w}x{norm_h}"
        )));
    }
    if norm_w > norm_h {
        return Err(BufferError::PreconditionViolation(format!(
            "analysis dimensions {norm_w}x{norm_h} are not orientation-normalized"
        )));
    }

    // Undo the transpose to compare against the original's orientation.
    let (an_w, an_h) = if transposed {
        (norm_h, norm_w)
    } else {
        (norm_w, norm_h)
    };

    // The analysis image scales the short side exactly and floors the long
    // side, so the reconstructed long side may be up to one pixel short.
    let expected_h = an_w as f64 * orig_h as f64 / orig_w as f64;
    if (expected_h - an_h as f64).abs() >= 1.0 {
        return Err(BufferError::PreconditionViolation(format!(
            "analysis {an_w}x{an_h} is not a uniform downscale of {orig_w}x{orig_h}"
        )));
    }

    let side = orig_w.min(orig_h);
    if orig_w == orig_h {
        return Ok(FocalRegion { x: 0, y: 0, side });
    }

    let orig_long = orig_w.max(orig_h) as u64;
    let analysis_long = norm_h as u64;
    let scaled = (offset as u64 * orig_long / analysis_long)
        .min(orig_long - side as u64) as u32;

    Ok(if transposed {
        FocalRegion {
            x: scaled,
            y: 0,
            side,
        }
    } else {
        FocalRegion {
            x: 0,
            y: scaled,
            side,
        }
    })
}
