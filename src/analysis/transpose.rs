//! Axis transposition for orientation normalization.
//!
//! The entropy scanner only walks the height axis, so landscape images are
//! transposed before analysis and the crop offset is mapped back onto the
//! x axis afterwards (see [`map_focal_region`](super::map_focal_region)).

use crate::raster::{BufferError, RasterBuffer};

/// Swap the width/height axes of an RGBA buffer.
///
/// `out[x][y] == in[y][x]` channel-wise. Allocates a new buffer; applying it
/// twice reproduces the input exactly.
pub fn transpose(raster: &RasterBuffer) -> Result<RasterBuffer, BufferError> {
    raster.validate()?;

    let (w, h) = (raster.width as usize, raster.height as usize);
    let mut data = vec![0u8; raster.data.len()];

    for y in 0..h {
        for x in 0..w {
            let src = (y * w + x) * 4;
            let dst = (x * h + y) * 4;
            data[dst..dst + 4].copy_from_slice(&raster.data[src..src + 4]);
        }
    }

    Ok(RasterBuffer {
        width: raster.height,
        height: raster.width,
        data,
    })
}

/// Ensure the buffer is at least as tall as wide, transposing if needed.
///
/// Returns the (possibly new) buffer and whether a transpose was applied —
/// the flag the crop mapping later uses to pick the axis the offset applies
/// to.
pub fn normalize_orientation(raster: RasterBuffer) -> Result<(RasterBuffer, bool), BufferError> {
    if raster.width > raster.height {
        let transposed = transpose(&raster)?;
        Ok((transposed, true))
    } else {
        raster.validate()?;
        Ok((raster, false))
    }
}
