use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct EncodedOutput {
    payload_size: usize,
    frame_size: usize,
    frame: String,
}

pub fn print_encoded(payload_size: usize, frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                payload_size,
                frame_size: frame.len(),
                frame: to_hex(frame),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PAYLOAD", "FRAME", "BYTES"])
                .add_row(vec![
                    payload_size.to_string(),
                    frame.len().to_string(),
                    to_hex(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "payload_size={payload_size} frame_size={} frame={}",
                frame.len(),
                to_hex(frame)
            );
        }
        OutputFormat::Raw => {
            print_raw(frame);
        }
    }
}

#[derive(Serialize)]
struct DecodedOutput {
    index: usize,
    payload_size: usize,
    payload: String,
    text: String,
}

pub fn print_decoded(index: usize, payload: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                index,
                payload_size: payload.len(),
                payload: to_hex(payload),
                text: payload_preview(payload),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    index.to_string(),
                    payload.len().to_string(),
                    payload_preview(payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "frame={index} size={} payload={}",
                payload.len(),
                to_hex(payload)
            );
        }
        OutputFormat::Raw => {
            print_raw(payload);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rendering_is_lowercase_and_packed() {
        assert_eq!(to_hex(&[0x7D, 0x00, 0xAB]), "7d00ab");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn preview_falls_back_for_binary() {
        assert_eq!(payload_preview(b"hello"), "hello");
        assert_eq!(payload_preview(&[0xFF, 0xFE]), "<binary 2 bytes>");
    }
}
