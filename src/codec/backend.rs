//! Codec trait and shared error type.
//!
//! The [`ImageCodec`] trait defines the two external collaborators the
//! pipeline needs: decode bytes into a raster, and crop-resize-encode a
//! raster back into bytes. The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec); tests swap in the recording
//! `MockCodec` below so pipeline logic runs without any real image data.

use crate::analysis::FocalRegion;
use crate::options::{EncodeFormat, Quality};
use crate::raster::{BufferError, RasterBuffer};
use thiserror::Error;

/// Hard ceiling on any requested decode side. Requests at or above this are
/// rejected before the codec does any work.
pub const MAX_DECODE_SIDE: u32 = 65536;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The input bytes are not a recognized raster image format.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    /// A requested decode side at or above [`MAX_DECODE_SIDE`].
    #[error("requested size {0} exceeds the {MAX_DECODE_SIDE} pixel ceiling")]
    SizeLimitExceeded(u32),
    /// The underlying decoder failed; the cause is attached opaquely.
    #[error("decode failed: {0}")]
    Decode(#[source] image::ImageError),
    /// The underlying encoder failed; the cause is attached opaquely.
    #[error("encode failed: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// The pipeline's two seams to the platform codec.
///
/// `Sync` so independent thumbnail requests can share one codec across
/// rayon workers.
pub trait ImageCodec: Sync {
    /// Decode image bytes into an RGBA raster.
    ///
    /// `max_side` caps the *short* side of the result; the long side scales
    /// proportionally (floored). `None` decodes at full resolution. The
    /// decoder never upscales. Fails with `UnsupportedMediaType` if the
    /// bytes are not a recognized image, and `SizeLimitExceeded` if the cap
    /// is at or above [`MAX_DECODE_SIDE`].
    fn decode(&self, bytes: &[u8], max_side: Option<u32>) -> Result<RasterBuffer, CodecError>;

    /// Crop `crop` out of `source`, resize the square to `output_side`, and
    /// encode it.
    fn resize_and_encode(
        &self,
        source: &RasterBuffer,
        crop: FocalRegion,
        output_side: u32,
        format: EncodeFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock codec that records operations and serves canned buffers.
    /// Uses Mutex (not RefCell) so it is Sync and works under rayon.
    #[derive(Default)]
    pub struct MockCodec {
        /// Popped per decode call, last first.
        pub decode_results: Mutex<Vec<RasterBuffer>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode {
            max_side: Option<u32>,
        },
        ResizeAndEncode {
            crop: FocalRegion,
            output_side: u32,
            format: EncodeFormat,
            quality: u8,
        },
    }

    impl MockCodec {
        pub fn with_decodes(results: Vec<RasterBuffer>) -> Self {
            Self {
                decode_results: Mutex::new(results),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageCodec for MockCodec {
        fn decode(&self, _bytes: &[u8], max_side: Option<u32>) -> Result<RasterBuffer, CodecError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode { max_side });

            self.decode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| CodecError::UnsupportedMediaType("no mock decode queued".into()))
        }

        fn resize_and_encode(
            &self,
            source: &RasterBuffer,
            crop: FocalRegion,
            output_side: u32,
            format: EncodeFormat,
            quality: Quality,
        ) -> Result<Vec<u8>, CodecError> {
            source.validate()?;
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::ResizeAndEncode {
                    crop,
                    output_side,
                    format,
                    quality: quality.value(),
                });
            Ok(vec![0xAB; 4])
        }
    }

    #[test]
    fn mock_records_decode() {
        let codec = MockCodec::with_decodes(vec![
            RasterBuffer::from_raw(2, 2, vec![0; 16]).unwrap(),
        ]);

        let raster = codec.decode(b"irrelevant", Some(256)).unwrap();
        assert_eq!((raster.width, raster.height), (2, 2));

        let ops = codec.get_operations();
        assert_eq!(ops, vec![RecordedOp::Decode { max_side: Some(256) }]);
    }

    #[test]
    fn mock_errors_when_exhausted() {
        let codec = MockCodec::default();
        assert!(matches!(
            codec.decode(b"irrelevant", None),
            Err(CodecError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn mock_records_encode() {
        let codec = MockCodec::default();
        let source = RasterBuffer::from_raw(4, 4, vec![1; 64]).unwrap();
        let crop = FocalRegion {
            x: 0,
            y: 1,
            side: 3,
        };

        let bytes = codec
            .resize_and_encode(&source, crop, 2, EncodeFormat::Png, Quality::new(90))
            .unwrap();
        assert!(!bytes.is_empty());

        let ops = codec.get_operations();
        assert_eq!(
            ops,
            vec![RecordedOp::ResizeAndEncode {
                crop,
                output_side: 2,
                format: EncodeFormat::Png,
                quality: 90,
            }]
        );
    }
}
