//! Parsing the uncompressed image container.
//!
//! The input is a binary PPM-style file: a short text header (magic
//! token, `width height`, max color value, with optional `#` comments)
//! followed by raw interleaved R,G,B bytes, three per pixel, row-major.
//! Parsing yields a validated [`ImageHeader`] and [`PixelBuffer`] pair;
//! on any failure nothing partial is exposed.

mod buffer;
mod header;

pub use buffer::{PixelBuffer, BYTES_PER_PIXEL};
pub use header::{ImageHeader, MAX_DIMENSION};

use std::io::{BufRead, Read};
use thiserror::Error;

/// Errors that can occur while parsing the image container.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The header is present but malformed or unsupported.
    #[error("bad header: {0}")]
    BadHeader(String),
    /// The stream ended before the header or pixel payload was complete.
    #[error("input ended early: {0}")]
    TruncatedInput(String),
    /// An underlying read failed for a reason other than end of stream.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a complete container: header, then exactly the pixel payload
/// the header declares.
pub fn parse(reader: &mut impl BufRead) -> Result<(ImageHeader, PixelBuffer), ParseError> {
    let header = header::parse_header(reader)?;

    let mut data = vec![0u8; header.pixel_bytes()];
    reader.read_exact(&mut data).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ParseError::TruncatedInput(format!(
                "pixel payload ended before {} bytes were read",
                header.pixel_bytes()
            ))
        } else {
            ParseError::Io(e)
        }
    })?;

    let buffer = PixelBuffer::new(data, &header)?;
    Ok((header, buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn container(width: u32, height: u32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = format!("P6\n{width} {height}\n255\n").into_bytes();
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn test_full_container_roundtrip() {
        let payload: Vec<u8> = (0..4 * 2 * 3).map(|i| i as u8).collect();
        let bytes = container(4, 2, &payload);

        let (header, buffer) = parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!((header.width, header.height), (4, 2));
        assert_eq!(buffer.pixels(), &payload[..]);
    }

    #[test]
    fn test_truncated_payload() {
        // Header declares 24 payload bytes, only 5 are present.
        let bytes = container(4, 2, &[1, 2, 3, 4, 5]);
        assert!(matches!(
            parse(&mut Cursor::new(bytes)),
            Err(ParseError::TruncatedInput(_))
        ));
    }

    #[test]
    fn test_hostile_dimensions_never_allocate() {
        // Absurd declared dimensions must surface as a header error
        // from the full parse path, long before any payload-sized
        // allocation is attempted.
        let bytes = b"P6\n4294967295 4294967295\n255\n".to_vec();
        assert!(matches!(
            parse(&mut Cursor::new(bytes)),
            Err(ParseError::BadHeader(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        // Anything after the declared payload is not consumed.
        let mut bytes = container(2, 2, &[0u8; 12]);
        bytes.extend_from_slice(b"trailing");

        let mut cursor = Cursor::new(bytes);
        let (_, buffer) = parse(&mut cursor).unwrap();
        assert_eq!(buffer.len(), 12);
    }
}
