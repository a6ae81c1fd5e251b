mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use iris_intent::config::{DEFAULT_MAX_FIELD_LEN, DEFAULT_MAX_RECORDS};
use iris_intent::DecodeConfig;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "iris", version, about = "Intent collection decoder")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Maximum number of records accepted in one buffer.
    #[arg(
        long,
        value_name = "N",
        env = "IRIS_MAX_RECORDS",
        default_value_t = DEFAULT_MAX_RECORDS,
        global = true
    )]
    max_records: usize,

    /// Maximum length in bytes of a single type tag or payload.
    #[arg(
        long,
        value_name = "BYTES",
        env = "IRIS_MAX_FIELD_LEN",
        default_value_t = DEFAULT_MAX_FIELD_LEN,
        global = true
    )]
    max_field_len: usize,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn decode_config(&self) -> DecodeConfig {
        DecodeConfig {
            max_records: self.max_records,
            max_field_len: self.max_field_len,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = cli.decode_config();
    let result = cmd::run(cli.command, format, &config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
