use std::io::{ErrorKind, Read};

use bytes::{Buf, Bytes, BytesMut};

use crate::decoder::FrameDecoder;
use crate::error::{FrameError, Result};
use crate::markers::Markers;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete,
/// un-escaped payloads. Bytes between frames (line noise, garbage before
/// SOF) are discarded by the underlying state machine.
///
/// Unlike [`FrameDecoder`], which degrades gracefully, the reader is
/// strict: a frame completed with a recorded codec error (overflowed
/// buffer, unknown escape index) is returned as `Err` rather than as a
/// partial payload.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    decoder: FrameDecoder,
}

impl<T: Read> FrameReader<T> {
    /// Create a frame reader with the default marker set.
    ///
    /// `capacity` bounds the reassembled payload size.
    pub fn new(inner: T, capacity: usize) -> Result<Self> {
        Self::with_markers(inner, capacity, Markers::default())
    }

    /// Create a frame reader with an explicit marker set.
    pub fn with_markers(inner: T, capacity: usize, markers: Markers) -> Result<Self> {
        Ok(Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
            decoder: FrameDecoder::with_markers(capacity, markers)?,
        })
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::StreamClosed)` when EOF is reached before
    /// a frame completes. Raw bytes read past the end of the returned
    /// frame are retained for the next call.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        loop {
            while !self.buf.is_empty() {
                let byte = self.buf[0];
                self.buf.advance(1);
                if self.decoder.advance(byte) {
                    let err = self.decoder.error();
                    let frame = Bytes::copy_from_slice(self.decoder.payload());
                    self.decoder.reset();
                    return match err {
                        Some(err) => Err(FrameError::Codec(err)),
                        None => Ok(frame),
                    };
                }
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::StreamClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Payload capacity of the reassembly buffer.
    pub fn capacity(&self) -> usize {
        self.decoder.capacity()
    }
}
