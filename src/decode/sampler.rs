//! Sampling encoded bit blocks back into clock values.

use super::{BaseOffset, DecodeError};
use crate::config::EncodingParameters;
use crate::container::BYTES_PER_PIXEL;
use tracing::trace;

/// Recovers one clock value by sampling one pixel per bit block.
///
/// The sample point sits `sample_subpixel_offset` rows and columns into
/// each block, keeping it clear of block edges that upstream scaling or
/// compression may have blurred. Only the red channel is inspected; the
/// encoding is monochrome and a block reads as `1` when the sampled
/// byte's high bit is set, which tolerates mild gray-level drift.
///
/// Bits are assembled most-significant first: the leftmost block is the
/// top bit of the result.
///
/// `params` must have passed [`EncodingParameters::validate`]; the
/// shift below assumes `bits_per_clock` is at most 64. [`super::decode`]
/// enforces this for callers going through the full pass.
pub fn sample_clock(
    pixels: &[u8],
    base: BaseOffset,
    slot_index: u32,
    width: u32,
    params: &EncodingParameters,
) -> Result<u64, DecodeError> {
    let line_stride = width as usize * BYTES_PER_PIXEL;
    let row_byte_offset = base.byte_offset
        + (slot_index * params.pixels_per_bit + params.sample_subpixel_offset) as usize
            * line_stride;

    let mut value = 0u64;
    for bit in 0..params.bits_per_clock {
        let offset = row_byte_offset
            + (bit * params.pixels_per_bit + params.sample_subpixel_offset) as usize
                * BYTES_PER_PIXEL;
        let red = *pixels
            .get(offset)
            .ok_or(DecodeError::GeometryOutOfBounds {
                offset,
                len: pixels.len(),
            })?;
        trace!(slot_index, bit, offset, red, "sampled block");

        if red & 0x80 != 0 {
            value |= 1u64 << (params.bits_per_clock - 1 - bit);
        }
    }

    Ok(value)
}
