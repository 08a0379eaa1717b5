//! Locating the encoded grid within a frame.
//!
//! The overlay centers the whole block grid in the frame, so the
//! decoder only needs the frame dimensions and the grid geometry to
//! find it again.

use crate::config::EncodingParameters;
use crate::container::BYTES_PER_PIXEL;
use tracing::debug;

/// Byte address of the top-left pixel of clock slot 0, bit 0.
///
/// All clock slots are addressed relative to this one offset; slot `n`
/// starts `n * pixels_per_bit` rows further down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseOffset {
    /// Offset into the row-major, 3-bytes-per-pixel buffer.
    pub byte_offset: usize,
}

/// Computes the base offset that centers the encoded grid in a frame
/// of the given size.
///
/// When the grid does not fit the frame, the offset on that axis clamps
/// to zero and decoding proceeds from the frame edge. That degraded
/// geometry matches the legacy decoder; the sampler still bounds-checks
/// every read.
pub fn resolve(width: u32, height: u32, params: &EncodingParameters) -> BaseOffset {
    let grid_width = params.grid_width_px();
    let grid_height = params.grid_height_px();
    if grid_width > width || grid_height > height {
        debug!(
            width,
            height,
            grid_width,
            grid_height,
            "grid does not fit the frame, clamping to the edge"
        );
    }

    let vert_offset_px = height.saturating_sub(grid_height) / 2;
    let horiz_offset_px = width.saturating_sub(grid_width) / 2;

    let byte_offset = vert_offset_px as usize * width as usize * BYTES_PER_PIXEL
        + horiz_offset_px as usize * BYTES_PER_PIXEL;
    debug!(vert_offset_px, horiz_offset_px, byte_offset, "resolved grid origin");

    BaseOffset { byte_offset }
}
