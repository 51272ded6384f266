//! Byte-stuffing framing codec for serial and embedded byte streams.
//!
//! stuffwire delimits arbitrary binary payloads inside a continuous byte
//! stream with reserved marker bytes (SOF/EOF/ESC) instead of length
//! prefixes, escaping any payload byte that collides with a marker.
//!
//! # Crate Structure
//!
//! - [`frame`] — the encoder, decoder state machine, and blocking
//!   `std::io` reader/writer adapters

/// Re-export frame codec types.
pub mod frame {
    pub use stuffwire_frame::*;
}
