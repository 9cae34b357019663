use bytes::Bytes;
use nodemsg_header::{decode_packet, encoded_size, PacketConfig};

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{header_error, hex_error, CliResult, SUCCESS};
use crate::output::{print_decoded, DecodedOutput, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let datagram = Bytes::from(parse_hex(&args.hex).map_err(|err| hex_error("datagram", err))?);
    let total_len = datagram.len();

    let config = PacketConfig {
        max_payload_size: args.max_payload,
    };
    let packet = decode_packet(datagram, &config).map_err(|err| header_error("decode failed", err))?;

    let offset = encoded_size(&packet.header);
    tracing::debug!(
        message_id = packet.header.message_id,
        payload_size = packet.payload.len(),
        "decoded datagram"
    );
    print_decoded(&DecodedOutput::new(&packet.header, offset, total_len), format);
    Ok(SUCCESS)
}
