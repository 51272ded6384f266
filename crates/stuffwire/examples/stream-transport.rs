//! Sends framed payloads across a socket pair with the blocking
//! reader/writer adapters.

use std::os::unix::net::UnixStream;

use stuffwire_frame::{FrameReader, FrameWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (left, right) = UnixStream::pair()?;
    let mut writer = FrameWriter::new(left, 256)?;
    let mut reader = FrameReader::new(right, 256)?;

    let sender = std::thread::spawn(move || -> Result<(), stuffwire_frame::FrameError> {
        writer.send(b"hello over the wire")?;
        writer.send(&[0x7D, 0x7E, 0x7F])?;
        Ok(())
    });

    for _ in 0..2 {
        let frame = reader.read_frame()?;
        match std::str::from_utf8(&frame) {
            Ok(text) => println!("received: {text}"),
            Err(_) => println!("received: {} binary bytes", frame.len()),
        }
    }

    sender.join().expect("sender thread panicked")?;
    Ok(())
}
