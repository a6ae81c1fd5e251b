use std::fs;
use std::io::Read;

use iris_intent::{decode_collection_with_config, DecodeConfig};
use tracing::{debug, info};

use crate::cmd::DecodeArgs;
use crate::exit::{intent_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_intents, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat, config: &DecodeConfig) -> CliResult<i32> {
    let buffer = read_buffer(&args)?;
    debug!(bytes = buffer.len(), ?config, "decoding intent buffer");

    let collection = decode_collection_with_config(&buffer, config).map_err(intent_error)?;
    let intents = collection.decode_statements();

    let invalid = intents.iter().filter(|i| i.statement.is_invalid()).count();
    info!(records = intents.len(), invalid, "decoded intent buffer");

    print_intents(&intents, format);
    Ok(SUCCESS)
}

fn read_buffer(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    if args.stdin {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return parse_hex(&input);
    }

    match &args.hex {
        Some(hex) => parse_hex(hex),
        None => Err(CliError::new(
            USAGE,
            "no input: pass a hex buffer, --file or --stdin",
        )),
    }
}

/// Parse a hex buffer, accepting an optional `0x` prefix and surrounding whitespace.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|err| CliError::new(USAGE, format!("invalid hex input: {err}")))
}
