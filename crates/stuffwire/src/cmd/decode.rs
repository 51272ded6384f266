use std::cell::RefCell;
use std::fs;
use std::io::Read;
use std::rc::Rc;

use stuffwire_frame::{FrameDecoder, StuffError};

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{io_error, stuff_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let wire = resolve_input(&args)?;

    let frames: Rc<RefCell<Vec<Vec<u8>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);

    let mut decoder = FrameDecoder::new(args.capacity)
        .map_err(|err| stuff_error("invalid capacity", err))?;
    decoder.set_callback(move |payload| sink.borrow_mut().push(payload.to_vec()));

    // The decoder's sticky error is cleared by the auto-reset on frame
    // completion, so poll it after every byte.
    let mut first_error: Option<StuffError> = None;
    for &byte in &wire {
        decoder.feed(byte);
        if first_error.is_none() {
            first_error = decoder.error();
        }
    }

    let frames = frames.borrow();
    let limit = args.count.unwrap_or(frames.len());
    for (index, payload) in frames.iter().take(limit).enumerate() {
        print_decoded(index, payload, format);
    }

    if args.strict {
        if let Some(err) = first_error {
            return Err(stuff_error("decode failed", err));
        }
        if decoder.in_frame() {
            return Err(CliError::new(FAILURE, "input ended mid-frame"));
        }
    }

    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut wire = Vec::new();
    std::io::stdin()
        .read_to_end(&mut wire)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(wire)
}
