//! Recovering the encoded clocks from a parsed frame.
//!
//! The decode pass resolves the grid origin once, then samples each
//! clock slot in encoding order. It is a pure function of the header,
//! the pixel buffer and the encoding parameters; decoding the same
//! frame twice yields bit-identical results.

mod clocks;
mod geometry;
mod sampler;

pub use clocks::{ClockSet, CLOCK_NAMES, CLOCK_SLOTS};
pub use geometry::{resolve, BaseOffset};
pub use sampler::sample_clock;

use crate::config::{ConfigError, EncodingParameters, Resolution};
use crate::container::{ImageHeader, PixelBuffer};
use thiserror::Error;

/// Errors that can occur during the decode pass.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The encoding parameters are out of range.
    #[error("invalid encoding parameters: {0}")]
    InvalidParameters(#[from] ConfigError),
    /// The buffer is smaller than the configured grid geometry implies.
    #[error("sample at byte {offset} lies outside the {len}-byte pixel buffer")]
    GeometryOutOfBounds { offset: usize, len: usize },
    /// The frame does not match the deployment's expected size.
    #[error("frame is {actual}, expected {expected}")]
    ResolutionMismatch {
        actual: Resolution,
        expected: Resolution,
    },
}

/// Rejects frames that do not match an exact expected size.
///
/// This is a deployment constraint, not a format requirement; callers
/// that accept any frame size simply skip it.
pub fn check_resolution(header: &ImageHeader, expected: Resolution) -> Result<(), DecodeError> {
    let actual = Resolution {
        width: header.width,
        height: header.height,
    };
    if actual != expected {
        return Err(DecodeError::ResolutionMismatch { actual, expected });
    }
    Ok(())
}

/// Decodes all configured clock slots from a frame.
///
/// Slots are sampled in encoding order (`buffer_time` first); when
/// fewer than six are configured the remaining fields stay zero.
/// Out-of-range parameters are rejected here, so callers need not
/// validate them separately.
pub fn decode(
    header: &ImageHeader,
    buffer: &PixelBuffer,
    params: &EncodingParameters,
) -> Result<ClockSet, DecodeError> {
    params.validate()?;
    let base = geometry::resolve(header.width, header.height, params);

    let mut slots = [0u64; CLOCK_SLOTS];
    let configured = (params.clock_count as usize).min(CLOCK_SLOTS);
    for (slot_index, slot) in slots.iter_mut().enumerate().take(configured) {
        *slot = sampler::sample_clock(
            buffer.pixels(),
            base,
            slot_index as u32,
            header.width,
            params,
        )?;
    }

    Ok(ClockSet::from_slots(slots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::BYTES_PER_PIXEL;
    use proptest::prelude::*;

    /// Paints one clock value as filled blocks, the same way the overlay
    /// element draws them: every pixel of a block takes the bit's color,
    /// leftmost block carrying the most significant bit.
    fn draw_clock(
        pixels: &mut [u8],
        width: u32,
        base: BaseOffset,
        slot_index: u32,
        value: u64,
        params: &EncodingParameters,
    ) {
        let line_stride = width as usize * BYTES_PER_PIXEL;
        let block = params.pixels_per_bit as usize;
        let mut row = base.byte_offset + slot_index as usize * block * line_stride;

        for _line in 0..block {
            for bit in 0..params.bits_per_clock {
                let color = if (value >> (params.bits_per_clock - 1 - bit)) & 1 == 1 {
                    0xFF
                } else {
                    0x00
                };
                let start = row + bit as usize * block * BYTES_PER_PIXEL;
                pixels[start..start + block * BYTES_PER_PIXEL].fill(color);
            }
            row += line_stride;
        }
    }

    /// Builds a 640x480 frame with the six clock values drawn in.
    fn frame_with_clocks(values: [u64; CLOCK_SLOTS]) -> (ImageHeader, PixelBuffer) {
        let header = ImageHeader {
            width: 640,
            height: 480,
            max_color_value: 255,
        };
        let params = EncodingParameters::default();
        let base = resolve(header.width, header.height, &params);

        let mut pixels = vec![0u8; header.pixel_bytes()];
        for (slot_index, &value) in values.iter().enumerate() {
            draw_clock(
                &mut pixels,
                header.width,
                base,
                slot_index as u32,
                value,
                &params,
            );
        }

        let buffer = PixelBuffer::new(pixels, &header).unwrap();
        (header, buffer)
    }

    #[test]
    fn test_boundary_patterns_roundtrip() {
        for pattern in [0, u64::MAX, 0xAAAA_AAAA_AAAA_AAAA, 0x5555_5555_5555_5555] {
            let (header, buffer) = frame_with_clocks([pattern; CLOCK_SLOTS]);
            let clocks = decode(&header, &buffer, &EncodingParameters::default()).unwrap();
            assert_eq!(clocks.slots(), [pattern; CLOCK_SLOTS], "pattern {pattern:#x}");
        }
    }

    #[test]
    fn test_slots_decode_independently() {
        // A distinct value per slot proves no row offset aliasing.
        let values = [
            0x0123_4567_89AB_CDEF,
            u64::MAX,
            0,
            0x8000_0000_0000_0001,
            0x00FF_00FF_00FF_00FF,
            0xDEAD_BEEF_CAFE_F00D,
        ];
        let (header, buffer) = frame_with_clocks(values);
        let clocks = decode(&header, &buffer, &EncodingParameters::default()).unwrap();

        assert_eq!(clocks.slots(), values);
        assert_eq!(
            clocks.latency,
            values[3].wrapping_sub(values[5]) as i64
        );
    }

    #[test]
    fn test_decode_is_idempotent() {
        let (header, buffer) = frame_with_clocks([7, 11, 13, 17, 19, 23]);
        let params = EncodingParameters::default();

        let first = decode(&header, &buffer, &params).unwrap();
        let second = decode(&header, &buffer, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fewer_configured_slots_leave_rest_zero() {
        let (header, buffer) = frame_with_clocks([u64::MAX; CLOCK_SLOTS]);
        let params = EncodingParameters {
            clock_count: 2,
            ..Default::default()
        };

        let clocks = decode(&header, &buffer, &params).unwrap();
        assert_eq!(clocks.buffer_time, u64::MAX);
        assert_eq!(clocks.stream_time, u64::MAX);
        assert_eq!(clocks.running_time, 0);
        assert_eq!(clocks.render_realtime, 0);
    }

    #[test]
    fn test_small_fixture_golden_value() {
        // 16x16 frame, one 4-bit clock. The 32-pixel-wide grid cannot be
        // centered, so the horizontal offset clamps to zero while the
        // vertical offset is (16 - 8) / 2 = 4 rows. The sample row is
        // pixel row 8; samples for bits 2 and 3 land past the 16-pixel
        // row edge and continue linearly into row 9, the legacy
        // buffer-linear behavior. With row 8 painted bright and row 9
        // dark, the decoded value is exactly 0xC.
        let header = ImageHeader {
            width: 16,
            height: 16,
            max_color_value: 255,
        };
        let params = EncodingParameters {
            bits_per_clock: 4,
            clock_count: 1,
            ..Default::default()
        };

        let row_bytes = 16 * BYTES_PER_PIXEL;
        let mut pixels = vec![0u8; header.pixel_bytes()];
        pixels[8 * row_bytes..9 * row_bytes].fill(0xFF);
        pixels[9 * row_bytes..10 * row_bytes].fill(0x00);
        let buffer = PixelBuffer::new(pixels, &header).unwrap();

        let clocks = decode(&header, &buffer, &params).unwrap();
        assert_eq!(clocks.buffer_time, 0xC);
    }

    #[test]
    fn test_frame_too_small_for_grid_errors() {
        // An 8x8 frame clamps the origin to zero, but the sample
        // addresses then run past the buffer and must be refused.
        let header = ImageHeader {
            width: 8,
            height: 8,
            max_color_value: 255,
        };
        let buffer = PixelBuffer::new(vec![0u8; header.pixel_bytes()], &header).unwrap();

        let result = decode(&header, &buffer, &EncodingParameters::default());
        assert!(matches!(
            result,
            Err(DecodeError::GeometryOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_out_of_range_parameters_rejected() {
        // bits_per_clock beyond 64 would otherwise overflow the bit
        // shift in the sampler; decode must refuse it instead.
        let (header, buffer) = frame_with_clocks([0; CLOCK_SLOTS]);
        let params = EncodingParameters {
            bits_per_clock: 100,
            ..Default::default()
        };

        let result = decode(&header, &buffer, &params);
        assert!(matches!(result, Err(DecodeError::InvalidParameters(_))));
    }

    #[test]
    fn test_resolution_check() {
        let header = ImageHeader {
            width: 640,
            height: 480,
            max_color_value: 255,
        };
        let expected = Resolution {
            width: 640,
            height: 480,
        };
        assert!(check_resolution(&header, expected).is_ok());

        let other = Resolution {
            width: 1280,
            height: 720,
        };
        assert!(matches!(
            check_resolution(&header, other),
            Err(DecodeError::ResolutionMismatch { .. })
        ));
    }

    #[test]
    fn test_parsed_container_decodes() {
        // Full path: serialize a frame into the container format, parse
        // it back, decode the clocks.
        let values = [100, 200, 300, 4_000, 4_500, 3_500];
        let (header, buffer) = frame_with_clocks(values);

        let mut bytes = format!("P6\n{} {}\n255\n", header.width, header.height).into_bytes();
        bytes.extend_from_slice(buffer.pixels());

        let mut cursor = std::io::Cursor::new(bytes);
        let (parsed_header, parsed_buffer) = crate::container::parse(&mut cursor).unwrap();
        assert_eq!(parsed_header, header);

        let clocks = decode(&parsed_header, &parsed_buffer, &EncodingParameters::default())
            .unwrap();
        assert_eq!(clocks.slots(), values);
        assert_eq!(clocks.latency, 500);
    }

    proptest! {
        #[test]
        fn prop_any_clock_values_roundtrip(values in prop::array::uniform6(any::<u64>())) {
            let (header, buffer) = frame_with_clocks(values);
            let clocks = decode(&header, &buffer, &EncodingParameters::default()).unwrap();
            prop_assert_eq!(clocks.slots(), values);
        }
    }
}
