//! Byte-stuffing frame codec for serial and embedded byte streams.
//!
//! Payloads are delimited with reserved marker bytes instead of length
//! prefixes:
//! - A start-of-frame byte (`SOF`, default 0x7D)
//! - An end-of-frame byte (`EOF`, default 0x7E)
//! - An escape byte (`ESC`, default 0x7F) followed by a one-byte escape
//!   index whenever a payload byte collides with a marker
//!
//! Both sides work with pre-allocated bounded buffers and never grow them,
//! so the codec is suitable for links where memory is fixed up front. The
//! [`FrameEncoder`]/[`FrameDecoder`] pair is fully synchronous and
//! byte-driven; [`FrameReader`] and [`FrameWriter`] adapt the codec to
//! blocking `std::io` streams.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod markers;
pub mod reader;
pub mod writer;

pub use decoder::FrameDecoder;
pub use encoder::FrameEncoder;
pub use error::{FrameError, Result, StuffError};
pub use markers::{
    Markers, DEFAULT_EOF, DEFAULT_EOF_INDEX, DEFAULT_ESC, DEFAULT_ESC_INDEX, DEFAULT_SOF,
    DEFAULT_SOF_INDEX,
};
pub use reader::FrameReader;
pub use writer::FrameWriter;
