use std::fs;
use std::io::Read;

use stuffwire_frame::FrameEncoder;

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{io_error, stuff_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;

    let mut encoder = FrameEncoder::new(args.capacity)
        .map_err(|err| stuff_error("invalid capacity", err))?;
    encoder.feed_all(&payload);
    if let Some(err) = encoder.error() {
        return Err(stuff_error("payload does not fit the working buffer", err));
    }

    print_encoded(payload.len(), &encoder.frame(), format);
    Ok(SUCCESS)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut payload = Vec::new();
    std::io::stdin()
        .read_to_end(&mut payload)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(payload)
}
