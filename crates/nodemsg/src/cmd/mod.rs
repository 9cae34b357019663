use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod size;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a hex-encoded datagram and print its header.
    Decode(DecodeArgs),
    /// Encode a header (and optional payload) as hex.
    Encode(EncodeArgs),
    /// Print the encoded header size for a presence combination.
    Size(SizeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Size(args) => size::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Datagram bytes as hex. Whitespace and ':' separators are ignored.
    pub hex: String,
    /// Reject datagrams whose payload exceeds this many bytes.
    #[arg(long, value_name = "BYTES", default_value_t = nodemsg_header::DEFAULT_MAX_PAYLOAD)]
    pub max_payload: usize,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message id (decimal or 0x-prefixed hex).
    #[arg(long, short = 'm', value_parser = parse_u32)]
    pub message_id: u32,
    /// Source node id (decimal or 0x-prefixed hex).
    #[arg(long, short = 's', value_parser = parse_u64)]
    pub source: Option<u64>,
    /// Destination node id (decimal or 0x-prefixed hex).
    #[arg(long, short = 'd', value_parser = parse_u64)]
    pub destination: Option<u64>,
    /// Payload bytes as hex, appended after the header.
    #[arg(long)]
    pub payload: Option<String>,
}

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Count a source node id.
    #[arg(long)]
    pub source: bool,
    /// Count a destination node id.
    #[arg(long)]
    pub destination: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_u64(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(&digits.replace('_', ""), 16),
        None => trimmed.replace('_', "").parse::<u64>(),
    };
    parsed.map_err(|err| format!("invalid number '{input}': {err}"))
}

fn parse_u32(input: &str) -> Result<u32, String> {
    let value = parse_u64(input)?;
    u32::try_from(value).map_err(|_| format!("'{input}' does not fit in 32 bits"))
}

/// Decode user-supplied hex, tolerating whitespace and ':' separators.
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_hex_and_decimal() {
        assert_eq!(parse_u64("42"), Ok(42));
        assert_eq!(parse_u64("0x1122334455667788"), Ok(0x1122_3344_5566_7788));
        assert_eq!(parse_u64("0X_ff"), Ok(255));
        assert!(parse_u64("0xZZ").is_err());
        assert_eq!(parse_u32("0x01020304"), Ok(0x0102_0304));
        assert!(parse_u32("0x100000000").is_err());
    }

    #[test]
    fn hex_ignores_separators() {
        assert_eq!(
            parse_hex("00 10:04 03\n02 01").unwrap(),
            vec![0x00, 0x10, 0x04, 0x03, 0x02, 0x01]
        );
        assert!(parse_hex("0").is_err());
    }
}
