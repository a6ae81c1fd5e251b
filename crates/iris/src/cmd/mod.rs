pub mod decode;
pub mod encode;
pub mod version;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use iris_intent::DecodeConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an intent buffer and print its statements.
    Decode(DecodeArgs),

    /// Build an intent buffer from an expression.
    Encode(EncodeArgs),

    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: &DecodeConfig) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format, config),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded buffer, with or without a 0x prefix.
    #[arg(value_name = "HEX", conflicts_with_all = ["file", "stdin"])]
    pub hex: Option<String>,

    /// Read the raw buffer from a file.
    #[arg(long, value_name = "PATH", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read a hex-encoded buffer from stdin.
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Expression such as "Password(secret) && Psp22(<account>, 100)".
    #[arg(value_name = "EXPRESSION")]
    pub expression: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Include build details and known intent types.
    #[arg(long)]
    pub extended: bool,
}
