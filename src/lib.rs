//! Timestamp Overlay Decoder
//!
//! Recovers the 64-bit pipeline clocks that an overlay element burned
//! into a video frame, so that end-to-end latency can be measured after
//! the frame has been captured, encoded, transported and decoded. Up to
//! six clocks are encoded as horizontal bands of 8x8-pixel monochrome
//! blocks, one block per bit, centered in the frame.
//!
//! # Architecture
//!
//! The decode is one linear pass:
//!
//! ```text
//! container (header + pixels) → geometry (grid origin)
//!     → sampler (one pixel per block, x6) → ClockSet + latency
//! ```
//!
//! # Design Principles
//!
//! - **No hidden state**: every stage is a pure function of its inputs;
//!   decoding the same frame twice yields identical results
//! - **Injected geometry**: block size, bit count and frame resolution
//!   are configuration, not compile-time constants
//! - **Errors propagate**: parsing and sampling return `Result`; only
//!   the CLI decides process exit
//!
//! # Example
//!
//! ```no_run
//! use timeoverlay_parse::{config::EncodingParameters, container, decode};
//!
//! let file = std::fs::File::open("grab.ppm").unwrap();
//! let mut reader = std::io::BufReader::new(file);
//!
//! let (header, buffer) = container::parse(&mut reader).unwrap();
//! let clocks = decode::decode(&header, &buffer, &EncodingParameters::default()).unwrap();
//!
//! println!("latency = {} ns", clocks.latency);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod container;
pub mod decode;

// Re-export commonly used types at crate root
pub use config::{EncodingParameters, FileConfig, Resolution};
pub use container::{ImageHeader, ParseError, PixelBuffer};
pub use decode::{decode, ClockSet, DecodeError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
