use iris_intent::StatementRegistry;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("iris {}", env!("CARGO_PKG_VERSION"));
    if !args.extended {
        return Ok(SUCCESS);
    }

    println!(
        "target: {}",
        option_env!("IRIS_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("IRIS_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!(
        "intent types: {}",
        StatementRegistry::new().tags().join(", ")
    );
    println!("fallback: plain text");
    Ok(SUCCESS)
}
