use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use msgroute_types::ProtocolUriDescriptor;
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
struct ProtocolsOutput<'a> {
    schema_id: &'a str,
    count: usize,
    protocols: &'a [ProtocolUriDescriptor],
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_table(header: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_protocols(schema_id: &str, protocols: &[ProtocolUriDescriptor], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ProtocolsOutput {
            schema_id,
            count: protocols.len(),
            protocols,
        }),
        OutputFormat::Table => {
            let rows = protocols
                .iter()
                .map(|p| {
                    vec![
                        p.protocol_uri(),
                        p.doc_uri().to_string(),
                        p.protocol_name().to_string(),
                        p.protocol_version(),
                    ]
                })
                .collect();
            print_table(&["PROTOCOL", "DOC", "NAME", "VERSION"], rows);
        }
        OutputFormat::Pretty => {
            println!("Protocols ({}):", protocols.len());
            for p in protocols {
                println!("  {} {} ({})", p.protocol_name(), p.protocol_version(), p.doc_uri());
            }
        }
        OutputFormat::Raw => {
            for p in protocols {
                println!("{p}");
            }
        }
    }
}
