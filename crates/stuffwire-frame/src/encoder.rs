use bytes::{BufMut, Bytes, BytesMut};

use crate::error::StuffError;
use crate::markers::Markers;

/// Escapes payload bytes into a bounded working buffer.
///
/// Bytes are fed one at a time (or as a block); marker-valued bytes are
/// stored as the two-byte sequence `ESC, index`. The working buffer has a
/// fixed capacity decided at construction and is never grown — a full
/// buffer records a sticky [`StuffError::BufferFull`] and refuses further
/// appends until [`reset`](Self::reset).
///
/// The accumulated bytes are wrapped with the SOF/EOF markers on demand by
/// [`copy_frame`](Self::copy_frame) or [`frame`](Self::frame); the encoder
/// itself performs no I/O.
#[derive(Debug)]
pub struct FrameEncoder {
    markers: Markers,
    buf: Box<[u8]>,
    cursor: usize,
    err: Option<StuffError>,
}

impl FrameEncoder {
    /// Create an encoder with the default marker set.
    pub fn new(capacity: usize) -> Result<Self, StuffError> {
        Self::with_markers(capacity, Markers::default())
    }

    /// Create an encoder with an explicit marker set.
    pub fn with_markers(capacity: usize, markers: Markers) -> Result<Self, StuffError> {
        if capacity == 0 {
            return Err(StuffError::ZeroCapacity);
        }
        Ok(Self {
            markers,
            buf: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
            err: None,
        })
    }

    /// Append one payload byte, escaping it if it collides with a marker.
    pub fn feed(&mut self, byte: u8) {
        if let Some(index) = self.markers.escape_index(byte) {
            self.push(self.markers.esc);
            self.push(index);
        } else {
            self.push(byte);
        }
    }

    /// Append a block of payload bytes. Equivalent to repeated
    /// [`feed`](Self::feed) calls.
    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }

    fn push(&mut self, byte: u8) {
        if self.cursor >= self.buf.len() {
            if self.err.is_none() {
                tracing::debug!(capacity = self.buf.len(), "encode buffer full, dropping byte");
            }
            self.err = Some(StuffError::BufferFull {
                capacity: self.buf.len(),
            });
            return;
        }
        self.buf[self.cursor] = byte;
        self.cursor += 1;
    }

    /// Size of the wrapped frame: the escaped bytes buffered so far plus
    /// the SOF/EOF pair. Reported regardless of error state.
    pub fn frame_size(&self) -> usize {
        self.cursor + 2
    }

    /// Copy the wrapped frame (SOF, escaped payload, EOF) into `dst`.
    ///
    /// Copies `min(frame_size(), dst.len())` bytes and returns the count.
    /// If `dst` is shorter than the full frame the copy is silently
    /// truncated and the EOF marker will be missing — callers compare the
    /// returned count against [`frame_size`](Self::frame_size). Returns 0
    /// for an empty `dst`.
    pub fn copy_frame(&self, dst: &mut [u8]) -> usize {
        let len = self.frame_size().min(dst.len());
        if len == 0 {
            return 0;
        }
        dst[0] = self.markers.sof;
        if len >= 2 {
            dst[1..len - 1].copy_from_slice(&self.buf[..len - 2]);
        }
        dst[len - 1] = self.markers.eof;
        len
    }

    /// The wrapped frame as freshly allocated [`Bytes`].
    pub fn frame(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.frame_size());
        out.put_u8(self.markers.sof);
        out.put_slice(self.escaped());
        out.put_u8(self.markers.eof);
        out.freeze()
    }

    /// The escaped payload accumulated so far, without the SOF/EOF pair.
    pub fn escaped(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Clear the cursor and the sticky error. Capacity and marker
    /// configuration persist.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.err = None;
    }

    /// The sticky error, if any append has been refused since the last
    /// reset.
    pub fn error(&self) -> Option<StuffError> {
        self.err
    }

    /// Working buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The configured marker set.
    pub fn markers(&self) -> Markers {
        self.markers
    }
}
