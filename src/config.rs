//! Encoding parameters and file configuration.
//!
//! The overlay geometry is fixed by whatever produced the frames, so the
//! decoder must be told the same block size, bit count, clock count and
//! sample offset. The values are injected rather than hard-coded; the
//! defaults match the reference overlay element.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Geometry of the encoded clock grid.
///
/// Must match the parameters of the overlay that burned the clocks into
/// the frame, or the sampled bits are meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingParameters {
    /// Edge length of the square block representing one bit, in pixels.
    pub pixels_per_bit: u32,
    /// Number of bits in one encoded clock value.
    pub bits_per_clock: u32,
    /// Number of clock slots stacked vertically (at most 6).
    pub clock_count: u32,
    /// Offset into each block, on both axes, of the pixel that is
    /// sampled. Interior pixels avoid block edges blurred by upstream
    /// scaling or compression.
    pub sample_subpixel_offset: u32,
}

impl Default for EncodingParameters {
    fn default() -> Self {
        Self {
            pixels_per_bit: 8,
            bits_per_clock: 64,
            clock_count: 6,
            sample_subpixel_offset: 4,
        }
    }
}

impl EncodingParameters {
    /// Total width of one clock's bit row, in pixels.
    #[inline]
    pub fn grid_width_px(&self) -> u32 {
        self.bits_per_clock * self.pixels_per_bit
    }

    /// Total height of the stacked clock rows, in pixels.
    #[inline]
    pub fn grid_height_px(&self) -> u32 {
        self.clock_count * self.pixels_per_bit
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixels_per_bit == 0 {
            return Err(ConfigError::InvalidBlockSize);
        }
        if self.bits_per_clock == 0 || self.bits_per_clock > 64 {
            return Err(ConfigError::InvalidBitsPerClock);
        }
        if self.clock_count == 0 || self.clock_count > 6 {
            return Err(ConfigError::InvalidClockCount);
        }
        if self.sample_subpixel_offset >= self.pixels_per_bit {
            return Err(ConfigError::InvalidSampleOffset);
        }
        // The grid spans must fit in u32 pixel coordinates, or every
        // downstream address computation is wrong.
        if self.bits_per_clock.checked_mul(self.pixels_per_bit).is_none()
            || self.clock_count.checked_mul(self.pixels_per_bit).is_none()
        {
            return Err(ConfigError::GridTooLarge);
        }
        Ok(())
    }
}

/// A frame size, used for the deployment-specific exact-size check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let parse = |field: &str| {
            field
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("expected WIDTHxHEIGHT, got {s:?}"))
        };
        Ok(Self {
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("pixels_per_bit must be nonzero")]
    InvalidBlockSize,
    #[error("bits_per_clock must be between 1 and 64")]
    InvalidBitsPerClock,
    #[error("clock_count must be between 1 and 6")]
    InvalidClockCount,
    #[error("sample_subpixel_offset must lie inside the block")]
    InvalidSampleOffset,
    #[error("block grid dimensions overflow pixel coordinates")]
    GridTooLarge,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Grid geometry of the encoded clocks.
    #[serde(default)]
    pub encoding: EncodingParameters,
    /// If set, inputs of any other size are rejected before decoding.
    #[serde(default)]
    pub expected_resolution: Option<Resolution>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.encoding.validate()?;
        Ok(config)
    }
}
