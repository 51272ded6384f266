//! Encodes the reference payloads and feeds the frames straight back
//! through a decoder, printing both sides of the trip.

use stuffwire_frame::{FrameDecoder, FrameEncoder};

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("0x{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payloads: [&[u8]; 3] = [
        &[0x55, 0x66, 0x88, 0x99],
        &[0x55, 0x7D, 0x88, 0x99],
        &[0x55, 0x7F, 0x00, 0x99],
    ];

    let mut encoder = FrameEncoder::new(200)?;
    let mut decoder = FrameDecoder::new(200)?;
    decoder.set_callback(|payload| println!("decoded: {}", hex(payload)));

    for payload in payloads {
        encoder.reset();
        encoder.feed_all(payload);
        let frame = encoder.frame();
        println!("encoded: {}", hex(&frame));
        decoder.feed_all(&frame);
    }

    Ok(())
}
