//! Header parsing for the binary full-color image container.
//!
//! The header is line-oriented ASCII: a magic token identifying the
//! format, the frame dimensions, and the maximum color value, with `#`
//! comment lines allowed between fields. Raw pixel bytes follow
//! immediately after the last header line.

use super::{ParseError, BYTES_PER_PIXEL};
use std::io::BufRead;
use tracing::debug;

/// Magic token for the binary 24-bit RGB container (PPM "P6").
const MAGIC: &str = "P6";

/// Upper bound on either frame dimension, in pixels.
///
/// Well beyond any realistic video frame; its purpose is to reject a
/// syntactically valid header that declares absurd dimensions before
/// anything tries to allocate the payload they imply.
pub const MAX_DIMENSION: u32 = 16_384;

/// Parsed image header.
///
/// Produced once per input and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Maximum value of one color channel. Only single-byte channels
    /// are supported, so this is at most 255.
    pub max_color_value: u8,
}

impl ImageHeader {
    /// Returns the pixel payload size this header declares, in bytes.
    ///
    /// Saturates instead of overflowing for hand-built headers with
    /// dimensions beyond [`MAX_DIMENSION`]; the parser never produces
    /// such a header.
    #[inline]
    pub fn pixel_bytes(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(BYTES_PER_PIXEL)
    }
}

/// Header parser states, advanced one matching line at a time.
/// Fields already collected travel with the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    ExpectMagic,
    ExpectDimensions,
    ExpectMaxValue { width: u32, height: u32 },
}

/// Reads header lines from `reader` until all three fields are collected.
///
/// Lines that do not start with the magic token are skipped while waiting
/// for it; `#` comment lines are skipped between the remaining fields.
/// The reader is left positioned at the first pixel byte.
pub(super) fn parse_header(reader: &mut impl BufRead) -> Result<ImageHeader, ParseError> {
    let mut state = HeaderState::ExpectMagic;

    loop {
        let line = read_line(reader)?;

        match state {
            HeaderState::ExpectMagic => {
                if line.starts_with(MAGIC) {
                    state = HeaderState::ExpectDimensions;
                }
            }
            HeaderState::ExpectDimensions => {
                if line.starts_with('#') {
                    debug!(comment = %line.trim_end(), "skipping header comment");
                    continue;
                }
                let (width, height) = parse_dimensions(&line)?;
                state = HeaderState::ExpectMaxValue { width, height };
            }
            HeaderState::ExpectMaxValue { width, height } => {
                if line.starts_with('#') {
                    debug!(comment = %line.trim_end(), "skipping header comment");
                    continue;
                }
                let max_color_value = parse_max_value(&line)?;
                debug!(width, height, max_color_value, "parsed image header");
                return Ok(ImageHeader {
                    width,
                    height,
                    max_color_value,
                });
            }
        }
    }
}

/// Reads one LF-terminated line, decoding it leniently as text.
fn read_line(reader: &mut impl BufRead) -> Result<String, ParseError> {
    let mut raw = Vec::new();
    let n = reader.read_until(b'\n', &mut raw)?;
    if n == 0 {
        return Err(ParseError::TruncatedInput(
            "stream ended inside the header".into(),
        ));
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Parses the `width height` line: the first two whitespace-separated
/// decimal integers, each between 1 and [`MAX_DIMENSION`].
fn parse_dimensions(line: &str) -> Result<(u32, u32), ParseError> {
    let mut fields = line.split_whitespace();
    let parse = |field: Option<&str>| -> Option<u32> { field.and_then(|f| f.parse().ok()) };

    match (parse(fields.next()), parse(fields.next())) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            if width > MAX_DIMENSION || height > MAX_DIMENSION {
                return Err(ParseError::BadHeader(format!(
                    "declared frame {width}x{height} exceeds the {MAX_DIMENSION}-pixel limit"
                )));
            }
            Ok((width, height))
        }
        _ => Err(ParseError::BadHeader(format!(
            "expected two positive dimensions, got {:?}",
            line.trim_end()
        ))),
    }
}

fn parse_max_value(line: &str) -> Result<u8, ParseError> {
    let value: u32 = line.trim().parse().map_err(|_| {
        ParseError::BadHeader(format!(
            "expected a decimal max color value, got {:?}",
            line.trim_end()
        ))
    })?;
    // Only one byte per channel is handled.
    u8::try_from(value).map_err(|_| {
        ParseError::BadHeader(format!("max color value {value} exceeds 255"))
    })
}
