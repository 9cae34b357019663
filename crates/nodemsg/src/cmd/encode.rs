use bytes::BytesMut;
use nodemsg_header::{encode_packet, MessageHeader, PacketConfig};

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{header_error, hex_error, CliResult, SUCCESS};
use crate::output::{print_encoded, EncodedOutput, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let header = MessageHeader {
        message_id: args.message_id,
        source_node_id: args.source,
        destination_node_id: args.destination,
    };

    let payload = match &args.payload {
        Some(text) => parse_hex(text).map_err(|err| hex_error("--payload", err))?,
        None => Vec::new(),
    };

    let mut wire = BytesMut::new();
    encode_packet(&header, &payload, &mut wire, &PacketConfig::default())
        .map_err(|err| header_error("encode failed", err))?;

    tracing::debug!(
        message_id = header.message_id,
        size = wire.len(),
        "encoded datagram"
    );
    print_encoded(&EncodedOutput::new(header.encoded_size(), &wire), format);
    Ok(SUCCESS)
}
