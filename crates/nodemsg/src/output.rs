use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use nodemsg_header::{MessageHeader, HEADER_VERSION};
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

/// A decoded datagram as shown to the user.
#[derive(Debug, Serialize)]
pub struct DecodedOutput {
    pub version: u8,
    pub message_id: u32,
    pub source_node_id: Option<String>,
    pub destination_node_id: Option<String>,
    pub header_size: usize,
    pub payload_offset: usize,
    pub payload_size: usize,
}

impl DecodedOutput {
    pub fn new(header: &MessageHeader, payload_offset: usize, total_len: usize) -> Self {
        Self {
            version: HEADER_VERSION,
            message_id: header.message_id,
            source_node_id: header.source_node_id.map(node_id_text),
            destination_node_id: header.destination_node_id.map(node_id_text),
            header_size: header.encoded_size(),
            payload_offset,
            payload_size: total_len - payload_offset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EncodedOutput {
    pub header_size: usize,
    pub total_size: usize,
    pub hex: String,
}

impl EncodedOutput {
    pub fn new(header_size: usize, wire: &[u8]) -> Self {
        Self {
            header_size,
            total_size: wire.len(),
            hex: hex::encode(wire),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SizeOutput {
    pub source_node_id: bool,
    pub destination_node_id: bool,
    pub header_size: usize,
}

impl SizeOutput {
    pub fn new(header: &MessageHeader) -> Self {
        Self {
            source_node_id: header.source_node_id.is_some(),
            destination_node_id: header.destination_node_id.is_some(),
            header_size: header.encoded_size(),
        }
    }
}

pub fn print_decoded(out: &DecodedOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "VERSION",
                    "MESSAGE ID",
                    "SOURCE",
                    "DESTINATION",
                    "HEADER",
                    "PAYLOAD",
                ])
                .add_row(vec![
                    out.version.to_string(),
                    format!("{:#010x}", out.message_id),
                    optional_text(&out.source_node_id),
                    optional_text(&out.destination_node_id),
                    out.header_size.to_string(),
                    out.payload_size.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "version={} message_id={:#010x} source={} destination={} header={} payload_offset={} payload={}",
                out.version,
                out.message_id,
                optional_text(&out.source_node_id),
                optional_text(&out.destination_node_id),
                out.header_size,
                out.payload_offset,
                out.payload_size
            );
        }
    }
}

pub fn print_encoded(out: &EncodedOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["HEADER", "TOTAL", "HEX"])
                .add_row(vec![
                    out.header_size.to_string(),
                    out.total_size.to_string(),
                    out.hex.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", out.hex),
    }
}

pub fn print_size(out: &SizeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SOURCE", "DESTINATION", "HEADER"])
                .add_row(vec![
                    presence_text(out.source_node_id),
                    presence_text(out.destination_node_id),
                    out.header_size.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", out.header_size),
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn node_id_text(node_id: u64) -> String {
    format!("{node_id:#018x}")
}

fn presence_text(present: bool) -> String {
    if present { "yes" } else { "-" }.to_string()
}

fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_output_counts_payload() {
        let header = MessageHeader::new(1).with_source_node_id(0xAB);
        let out = DecodedOutput::new(&header, 14, 20);
        assert_eq!(out.header_size, 14);
        assert_eq!(out.payload_size, 6);
        assert_eq!(out.source_node_id.as_deref(), Some("0x00000000000000ab"));
        assert!(out.destination_node_id.is_none());
    }

    #[test]
    fn size_output_follows_presence() {
        let out = SizeOutput::new(&MessageHeader::new(0).with_destination_node_id(0));
        assert!(!out.source_node_id);
        assert!(out.destination_node_id);
        assert_eq!(out.header_size, 14);
    }

    #[test]
    fn encoded_output_is_lower_hex() {
        let out = EncodedOutput::new(6, &[0x00, 0x10, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(out.hex, "001004030201");
        assert_eq!(out.total_size, 6);
    }
}
