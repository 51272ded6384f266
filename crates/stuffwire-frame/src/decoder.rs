use std::fmt;

use crate::error::StuffError;
use crate::markers::Markers;

/// Reassembly state, driven one byte at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Discarding bytes until a SOF marker is seen.
    SearchingStart,
    /// Accumulating payload bytes until EOF.
    Payload,
    /// An ESC marker was seen; the next byte is an escape index.
    Escape,
}

type Callback = Box<dyn FnMut(&[u8])>;

/// Streaming frame-reassembly state machine.
///
/// Consumes a raw byte stream one byte at a time, strips the SOF/EOF
/// framing, un-escapes `ESC, index` pairs back into marker literals, and
/// delivers each completed frame to the registered callback. The payload
/// view passed to the callback is valid only for the duration of the call;
/// the working buffer is cleared immediately after it returns.
///
/// Errors are sticky and polled via [`error`](Self::error): a full buffer
/// or an unknown escape index is recorded but never stops the machine —
/// framing boundaries keep being detected so the stream stays
/// synchronized.
pub struct FrameDecoder {
    markers: Markers,
    state: DecodeState,
    buf: Box<[u8]>,
    cursor: usize,
    err: Option<StuffError>,
    callback: Option<Callback>,
}

impl FrameDecoder {
    /// Create a decoder with the default marker set.
    pub fn new(capacity: usize) -> Result<Self, StuffError> {
        Self::with_markers(capacity, Markers::default())
    }

    /// Create a decoder with an explicit marker set.
    pub fn with_markers(capacity: usize, markers: Markers) -> Result<Self, StuffError> {
        if capacity == 0 {
            return Err(StuffError::ZeroCapacity);
        }
        Ok(Self {
            markers,
            state: DecodeState::SearchingStart,
            buf: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
            err: None,
            callback: None,
        })
    }

    /// Register the frame consumer. Single slot: a second call replaces
    /// the first. With no callback registered, completed frames are
    /// silently discarded.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&[u8]) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Remove the registered callback.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Consume one byte from the incoming stream.
    ///
    /// If the byte completes a frame, the callback is invoked synchronously
    /// before `feed` returns, then the decoder auto-resets to searching for
    /// the next SOF.
    pub fn feed(&mut self, byte: u8) {
        if self.advance(byte) {
            tracing::debug!(len = self.cursor, "frame complete");
            if let Some(callback) = self.callback.as_mut() {
                callback(&self.buf[..self.cursor]);
            }
            self.reset();
        }
    }

    /// Consume a block of bytes. Equivalent to repeated
    /// [`feed`](Self::feed) calls; state persists across blocks.
    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }

    /// Run the transition table for one byte. Returns true when the byte
    /// completes a frame; the payload is then in `buf[..cursor]` and the
    /// caller is responsible for resetting.
    pub(crate) fn advance(&mut self, byte: u8) -> bool {
        match self.state {
            DecodeState::SearchingStart => {
                if byte == self.markers.sof {
                    self.state = DecodeState::Payload;
                }
                false
            }
            DecodeState::Payload => {
                if byte == self.markers.eof {
                    true
                } else if byte == self.markers.esc {
                    self.state = DecodeState::Escape;
                    false
                } else {
                    self.push(byte);
                    false
                }
            }
            DecodeState::Escape => {
                // A malformed escape flags an error but does not abort the
                // frame; the two-byte unit contributes nothing.
                self.state = DecodeState::Payload;
                match self.markers.marker_for_index(byte) {
                    Some(literal) => self.push(literal),
                    None => {
                        tracing::warn!(index = byte, "unknown escape index");
                        self.err = Some(StuffError::UnknownEscape { index: byte });
                    }
                }
                false
            }
        }
    }

    fn push(&mut self, byte: u8) {
        if self.cursor >= self.buf.len() {
            self.err = Some(StuffError::BufferFull {
                capacity: self.buf.len(),
            });
            return;
        }
        self.buf[self.cursor] = byte;
        self.cursor += 1;
    }

    /// The payload accumulated for the frame in progress.
    pub(crate) fn payload(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Force the machine back to searching for SOF and clear the working
    /// buffer and sticky error. Used to recover from a desynchronized
    /// stream without waiting for a natural EOF.
    pub fn reset(&mut self) {
        self.state = DecodeState::SearchingStart;
        self.cursor = 0;
        self.err = None;
    }

    /// The sticky error, if any was recorded since the last reset or
    /// frame completion.
    pub fn error(&self) -> Option<StuffError> {
        self.err
    }

    /// True while a frame is being reassembled, i.e. a SOF has been seen
    /// but its EOF has not.
    pub fn in_frame(&self) -> bool {
        self.state != DecodeState::SearchingStart
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

impl fmt::Debug for FrameDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDecoder")
            .field("markers", &self.markers)
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("capacity", &self.buf.len())
            .field("err", &self.err)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
