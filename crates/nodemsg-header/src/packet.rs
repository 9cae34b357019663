use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::error::{HeaderError, Result};
use crate::header::{decode, encode_to, encoded_size, MessageHeader};

/// Default maximum payload size: 64 KiB, the ceiling of a UDP datagram.
pub const DEFAULT_MAX_PAYLOAD: usize = 64 * 1024;

/// A decoded datagram: header plus the payload that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: MessageHeader,
    pub payload: Bytes,
}

impl Packet {
    /// Create a new packet.
    pub fn new(header: MessageHeader, payload: impl Into<Bytes>) -> Self {
        Self {
            header,
            payload: payload.into(),
        }
    }

    /// The total wire size of this packet (header + payload).
    pub fn wire_size(&self) -> usize {
        encoded_size(&self.header) + self.payload.len()
    }
}

/// Configuration for the packet helpers and codec.
#[derive(Debug, Clone)]
pub struct PacketConfig {
    /// Maximum payload size in bytes. Default: 64 KiB.
    pub max_payload_size: usize,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Decode the header at the front of `datagram` and return it together with
/// the offset at which the payload starts.
pub fn split_packet(datagram: &[u8]) -> Result<(MessageHeader, usize)> {
    let header = decode(datagram)?;
    Ok((header, encoded_size(&header)))
}

/// Decode a whole datagram into a [`Packet`] without copying the payload.
pub fn decode_packet(src: Bytes, config: &PacketConfig) -> Result<Packet> {
    let (header, offset) = split_packet(&src)?;
    let payload_len = src.len() - offset;
    check_payload(payload_len, config)?;

    Ok(Packet {
        header,
        payload: src.slice(offset..),
    })
}

/// Append `header` followed by `payload` to `dst`.
pub fn encode_packet(
    header: &MessageHeader,
    payload: &[u8],
    dst: &mut BytesMut,
    config: &PacketConfig,
) -> Result<()> {
    check_payload(payload.len(), config)?;
    dst.reserve(encoded_size(header) + payload.len());
    encode_to(header, dst)?;
    dst.put_slice(payload);
    Ok(())
}

fn check_payload(len: usize, config: &PacketConfig) -> Result<()> {
    if len > config.max_payload_size {
        debug!(
            size = len,
            max = config.max_payload_size,
            "packet payload over limit"
        );
        return Err(HeaderError::PayloadTooLarge {
            size: len,
            max: config.max_payload_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeaderErrorKind;

    #[test]
    fn encode_decode_roundtrip() {
        let header = MessageHeader::new(42).with_destination_node_id(0xFEED);
        let payload = b"hello, node!";
        let mut buf = BytesMut::new();

        encode_packet(&header, payload, &mut buf, &PacketConfig::default()).unwrap();
        assert_eq!(buf.len(), 14 + payload.len());

        let packet = decode_packet(buf.freeze(), &PacketConfig::default()).unwrap();
        assert_eq!(packet.header, header);
        assert_eq!(packet.payload.as_ref(), payload);
        assert_eq!(packet.wire_size(), 14 + payload.len());
    }

    #[test]
    fn split_reports_payload_offset() {
        let mut buf = BytesMut::new();
        let header = MessageHeader::new(1).with_source_node_id(2);
        encode_packet(&header, b"body", &mut buf, &PacketConfig::default()).unwrap();

        let (decoded, offset) = split_packet(&buf).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(offset, 14);
        assert_eq!(&buf[offset..], b"body");
    }

    #[test]
    fn empty_payload() {
        let mut buf = BytesMut::new();
        encode_packet(&MessageHeader::new(0), b"", &mut buf, &PacketConfig::default()).unwrap();

        let packet = decode_packet(buf.freeze(), &PacketConfig::default()).unwrap();
        assert!(packet.payload.is_empty());
    }

    #[test]
    fn payload_too_large_on_encode() {
        let cfg = PacketConfig {
            max_payload_size: 4,
        };
        let mut buf = BytesMut::new();
        let err = encode_packet(&MessageHeader::new(1), b"12345", &mut buf, &cfg).unwrap_err();
        assert!(matches!(err, HeaderError::PayloadTooLarge { size: 5, max: 4 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn payload_too_large_on_decode() {
        let mut buf = BytesMut::new();
        encode_packet(&MessageHeader::new(1), b"12345", &mut buf, &PacketConfig::default())
            .unwrap();

        let cfg = PacketConfig {
            max_payload_size: 4,
        };
        let err = decode_packet(buf.freeze(), &cfg).unwrap_err();
        assert_eq!(err.kind(), HeaderErrorKind::InvalidArgument);
    }

    #[test]
    fn header_errors_pass_through() {
        let err = decode_packet(Bytes::from_static(&[0x00, 0x40, 0, 0, 0, 0]), &PacketConfig::default())
            .unwrap_err();
        assert_eq!(err.kind(), HeaderErrorKind::VersionMismatch);

        let err = decode_packet(Bytes::from_static(&[0x00, 0x10]), &PacketConfig::default())
            .unwrap_err();
        assert_eq!(err.kind(), HeaderErrorKind::InvalidArgument);
    }
}
