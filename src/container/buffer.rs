//! Pixel buffer type for a parsed frame.

use super::{ImageHeader, ParseError};

/// Bytes per pixel for the interleaved R,G,B layout.
pub const BYTES_PER_PIXEL: usize = 3;

/// Raw pixel data for one decoded frame.
///
/// Owns a contiguous `width * height * 3` byte array in row-major,
/// top-to-bottom order with interleaved R,G,B channels. The length
/// invariant is enforced at construction, so downstream sampling can
/// reason about addresses without re-checking the dimensions.
#[derive(Clone)]
pub struct PixelBuffer {
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw pixel bytes, validating them against the declared header.
    ///
    /// A short payload is reported as truncated input; a long one means the
    /// header and payload disagree and is rejected as a format problem.
    pub fn new(data: Vec<u8>, header: &ImageHeader) -> Result<Self, ParseError> {
        let expected = header.pixel_bytes();
        if data.len() < expected {
            return Err(ParseError::TruncatedInput(format!(
                "pixel payload is {} bytes, header declares {}",
                data.len(),
                expected
            )));
        }
        if data.len() > expected {
            return Err(ParseError::BadHeader(format!(
                "pixel payload is {} bytes, header declares only {}",
                data.len(),
                expected
            )));
        }
        Ok(Self { data })
    }

    /// Returns the raw pixel bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Returns the buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("bytes", &self.data.len())
            .finish()
    }
}
