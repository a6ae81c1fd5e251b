use iris_intent::{build_collection, encode_collection};
use tracing::info;

use crate::cmd::EncodeArgs;
use crate::exit::{expression_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let collection = build_collection(&args.expression)
        .map_err(|err| expression_error("invalid expression", err))?;
    let wire = encode_collection(&collection);

    info!(
        records = collection.len(),
        bytes = wire.len(),
        "encoded intent buffer"
    );

    print_encoded(&collection, &wire, format);
    Ok(SUCCESS)
}
