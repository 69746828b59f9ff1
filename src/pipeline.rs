//! Thumbnail pipeline orchestration.
//!
//! A single linear pass per request:
//!
//! ```text
//! decode (analysis cap) → normalize orientation → entropy scan (skipped
//! for square) → full decode → map focal region → crop + resize → encode
//! ```
//!
//! Each stage's output is the next stage's sole input; any failure
//! propagates immediately and nothing is retried — the core stages are
//! deterministic, so a retry would reproduce the same error. Progress is
//! observable through an optional [`PipelineEvent`] channel instead of a
//! global debug flag, so diagnostics are per call and testable.

use crate::analysis::{
    EntropyWindow, FocalRegion, compute_focal_crop, map_focal_region, normalize_orientation,
};
use crate::codec::{CodecError, ImageCodec, MAX_DECODE_SIDE};
use crate::options::ThumbnailOptions;
use crate::raster::{BufferError, GrayscaleBuffer};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Stage-by-stage progress, emitted when the caller supplies a sender.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Decoded { width: u32, height: u32 },
    Normalized { transposed: bool },
    Scanned { window: EntropyWindow },
    /// Square analysis image: exactly one possible window, nothing to scan.
    ScanSkipped,
    Cropped { region: FocalRegion, output_side: u32 },
    Encoded { bytes: usize },
}

fn emit(events: Option<&Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(tx) = events {
        // A dropped receiver just means nobody is listening.
        let _ = tx.send(event);
    }
}

/// Produce an encoded square thumbnail cropped at the image's most detailed
/// region.
///
/// Option handling: zero sizes fall back to their defaults; an analysis cap
/// at or above [`MAX_DECODE_SIDE`] is rejected before any decode. The
/// output never upscales past the source's short axis.
pub fn generate_thumbnail(
    codec: &impl ImageCodec,
    bytes: &[u8],
    options: &ThumbnailOptions,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<Vec<u8>, ThumbnailError> {
    let input_size = options.effective_input_size();
    if input_size >= MAX_DECODE_SIDE {
        return Err(CodecError::SizeLimitExceeded(input_size).into());
    }
    let output_size = options.effective_output_size();

    let analysis = codec.decode(bytes, Some(input_size))?;
    emit(
        events,
        PipelineEvent::Decoded {
            width: analysis.width,
            height: analysis.height,
        },
    );

    let (normalized, transposed) = normalize_orientation(analysis)?;
    emit(events, PipelineEvent::Normalized { transposed });

    // A square analysis image has exactly one candidate window, so even the
    // single entropy computation is skipped.
    let scan = if normalized.width != normalized.height {
        let gray = GrayscaleBuffer::from_raster(&normalized)?;
        let window = compute_focal_crop(&gray);
        emit(events, PipelineEvent::Scanned { window });
        Some(window)
    } else {
        emit(events, PipelineEvent::ScanSkipped);
        None
    };
    let analysis_dims = (normalized.width, normalized.height);

    let full = codec.decode(bytes, None)?;
    let offset = scan.map(|window| window.offset).unwrap_or(0);
    let region = map_focal_region(
        (full.width, full.height),
        analysis_dims,
        transposed,
        offset,
    )?;
    let output_side = output_size.min(region.side);
    emit(
        events,
        PipelineEvent::Cropped {
            region,
            output_side,
        },
    );

    let encoded =
        codec.resize_and_encode(&full, region, output_side, options.format, options.quality)?;
    emit(
        events,
        PipelineEvent::Encoded {
            bytes: encoded.len(),
        },
    );
    Ok(encoded)
}
