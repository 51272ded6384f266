use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a payload into a framed byte sequence.
    Encode(EncodeArgs),
    /// Decode framed bytes and print the recovered payloads.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Raw string payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex payload (whitespace, commas and 0x prefixes are ignored).
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
    /// Working buffer capacity in bytes (bounds the escaped payload).
    #[arg(long, default_value_t = 1024)]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex input (whitespace, commas and 0x prefixes are ignored).
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read framed bytes from file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Working buffer capacity in bytes (bounds the reassembled payload).
    #[arg(long, default_value_t = 1024)]
    pub capacity: usize,
    /// Fail if a decode error or an unterminated frame is encountered.
    #[arg(long)]
    pub strict: bool,
    /// Stop after printing N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build metadata.
    #[arg(long)]
    pub extended: bool,
}

/// Parse loosely formatted hex input: `"7d 55 7e"`, `"0x7D,0x55"` and
/// `"7d557e"` are all accepted.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let mut digits = String::new();
    for token in input.split(|c: char| c.is_whitespace() || c == ',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        digits.push_str(token);
    }

    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            "hex input must contain an even number of digits",
        ));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte: {}", &digits[i..i + 2])))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_common_shapes() {
        assert_eq!(parse_hex("7d 55 7e").unwrap(), vec![0x7D, 0x55, 0x7E]);
        assert_eq!(parse_hex("0x7D,0x55").unwrap(), vec![0x7D, 0x55]);
        assert_eq!(parse_hex("7d557e").unwrap(), vec![0x7D, 0x55, 0x7E]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn parse_hex_rejects_odd_and_invalid_input() {
        assert_eq!(parse_hex("7d5").unwrap_err().code, USAGE);
        assert_eq!(parse_hex("zz").unwrap_err().code, USAGE);
    }
}
