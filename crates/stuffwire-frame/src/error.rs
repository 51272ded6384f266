/// Errors recorded by the encoder and decoder.
///
/// These are sticky: once set on an instance they persist until `reset`,
/// and callers poll them via `error()` rather than receiving them from
/// each `feed` call. Processing never aborts on a sticky error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StuffError {
    /// A working buffer was constructed with zero capacity.
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// An append was attempted on a full working buffer.
    #[error("working buffer full ({capacity} bytes)")]
    BufferFull { capacity: usize },

    /// An escape sequence carried an index matching none of the three
    /// known escape indices.
    #[error("unknown escape index 0x{index:02X}")]
    UnknownEscape { index: u8 },
}

/// Errors surfaced by the blocking stream layer.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A codec-level error (full buffer, malformed escape).
    #[error(transparent)]
    Codec(#[from] StuffError),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("stream closed (incomplete frame)")]
    StreamClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
