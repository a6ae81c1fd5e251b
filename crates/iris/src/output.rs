use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use iris_intent::{DecodedIntent, DecodedStatement, IntentCollection};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
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
struct DecodeOutput<'a> {
    count: usize,
    invalid: usize,
    intents: Vec<IntentOutput<'a>>,
}

#[derive(Serialize)]
struct IntentOutput<'a> {
    index: usize,
    #[serde(rename = "type")]
    type_tag: &'a str,
    statement: &'a DecodedStatement,
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    records: usize,
    bytes: usize,
    types: Vec<&'a str>,
    hex: String,
}

pub fn print_intents(intents: &[DecodedIntent], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodeOutput {
                count: intents.len(),
                invalid: intents.iter().filter(|i| i.statement.is_invalid()).count(),
                intents: intents
                    .iter()
                    .enumerate()
                    .map(|(index, intent)| IntentOutput {
                        index,
                        type_tag: &intent.type_tag,
                        statement: &intent.statement,
                    })
                    .collect(),
            };
            println!("{}", to_json(&out));
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INDEX", "TYPE", "KIND", "STATEMENT"]);
            for (index, intent) in intents.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    intent.type_tag.clone(),
                    intent.statement.kind().to_string(),
                    intent.statement.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if intents.is_empty() {
                println!("no intents");
            }
            for (index, intent) in intents.iter().enumerate() {
                println!("#{index} {}: {}", intent.type_tag, intent.statement);
            }
        }
    }
}

pub fn print_encoded(collection: &IntentCollection, wire: &[u8], format: OutputFormat) {
    let hex = format!("0x{}", hex::encode(wire));
    match format {
        OutputFormat::Json => {
            let out = EncodeOutput {
                records: collection.len(),
                bytes: wire.len(),
                types: collection.iter().map(|r| r.type_tag()).collect(),
                hex,
            };
            println!("{}", to_json(&out));
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INDEX", "TYPE", "PAYLOAD_SIZE"]);
            for (index, record) in collection.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    record.type_tag().to_string(),
                    record.payload().len().to_string(),
                ]);
            }
            println!("{table}");
            println!("{hex}");
        }
        OutputFormat::Pretty => println!("{hex}"),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}
