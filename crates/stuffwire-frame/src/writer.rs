use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};

use crate::encoder::FrameEncoder;
use crate::error::{FrameError, Result};
use crate::markers::Markers;

/// Writes complete frames to any `Write` stream.
///
/// Each [`send`](Self::send) escapes the payload through an internal
/// [`FrameEncoder`] (reset per call), wraps it with the SOF/EOF pair and
/// writes it out in full. Payloads whose escaped form exceeds the
/// configured capacity are rejected before anything hits the wire.
pub struct FrameWriter<T> {
    inner: T,
    encoder: FrameEncoder,
    buf: BytesMut,
}

impl<T: Write> FrameWriter<T> {
    /// Create a frame writer with the default marker set.
    ///
    /// `capacity` bounds the escaped payload size per frame.
    pub fn new(inner: T, capacity: usize) -> Result<Self> {
        Self::with_markers(inner, capacity, Markers::default())
    }

    /// Create a frame writer with an explicit marker set.
    pub fn with_markers(inner: T, capacity: usize, markers: Markers) -> Result<Self> {
        Ok(Self {
            inner,
            encoder: FrameEncoder::with_markers(capacity, markers)?,
            buf: BytesMut::new(),
        })
    }

    /// Encode and send one payload as a complete frame (blocking).
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.encoder.reset();
        self.encoder.feed_all(payload);
        if let Some(err) = self.encoder.error() {
            return Err(FrameError::Codec(err));
        }

        let markers = self.encoder.markers();
        self.buf.clear();
        self.buf.reserve(self.encoder.frame_size());
        self.buf.put_u8(markers.sof);
        self.buf.put_slice(self.encoder.escaped());
        self.buf.put_u8(markers.eof);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::StreamClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Escaped-payload capacity per frame.
    pub fn capacity(&self) -> usize {
        self.encoder.capacity()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::error::StuffError;
    use crate::reader::FrameReader;

    #[test]
    fn write_single_frame() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()), 64).unwrap();
        writer.send(b"hello").unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire[0], 0x7D);
        assert_eq!(*wire.last().unwrap(), 0x7E);
        assert_eq!(&wire[1..wire.len() - 1], b"hello");
    }

    #[test]
    fn markers_are_escaped_on_the_wire() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()), 64).unwrap();
        writer.send(&[0x55, 0x7D, 0x88, 0x99]).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, vec![0x7D, 0x55, 0x7F, 0x00, 0x88, 0x99, 0x7E]);
    }

    #[test]
    fn written_frames_decode() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()), 64).unwrap();
        writer.send(b"one").unwrap();
        writer.send(&[0x7F, 0x00]).unwrap();
        writer.send(b"").unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = FrameReader::new(Cursor::new(wire), 64).unwrap();
        assert_eq!(reader.read_frame().unwrap().as_ref(), b"one");
        assert_eq!(reader.read_frame().unwrap().as_ref(), &[0x7F, 0x00]);
        assert!(reader.read_frame().unwrap().is_empty());
    }

    #[test]
    fn payload_too_large_rejected_before_write() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()), 4).unwrap();
        let err = writer.send(b"oversized").unwrap_err();
        assert!(matches!(
            err,
            FrameError::Codec(StuffError::BufferFull { capacity: 4 })
        ));

        // Nothing was written, and the writer recovers on the next send.
        writer.send(b"ok").unwrap();
        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, vec![0x7D, b'o', b'k', 0x7E]);
    }

    #[test]
    fn escaping_counts_against_capacity() {
        // Two marker bytes escape to four, exceeding a capacity of 3.
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()), 3).unwrap();
        let err = writer.send(&[0x7D, 0x7E]).unwrap_err();
        assert!(matches!(err, FrameError::Codec(StuffError::BufferFull { .. })));
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::new(sink, 16).unwrap();

        writer.send(b"x").unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let inner = InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        };

        let mut writer = FrameWriter::new(inner, 16).unwrap();
        writer.send(b"retry").unwrap();

        let inner = writer.into_inner();
        assert_eq!(inner.data, vec![0x7D, b'r', b'e', b't', b'r', b'y', 0x7E]);
    }

    #[test]
    fn stream_closed_when_write_returns_zero() {
        let mut writer = FrameWriter::new(ZeroWriter, 16).unwrap();
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, FrameError::StreamClosed));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()), 16).unwrap();
        let _ = writer.get_ref();
        let _ = writer.get_mut();
        assert_eq!(writer.capacity(), 16);
        let _inner = writer.into_inner();
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
