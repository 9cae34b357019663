use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::HeaderError;
use crate::packet::{decode_packet, encode_packet, Packet, PacketConfig};

/// Datagram codec for `tokio_util` framed transports.
///
/// Every call to `decode` treats the whole buffer as one datagram, which is
/// how `UdpFramed` hands them over. Stream transports need their own length
/// framing above this codec.
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: PacketConfig,
}

impl PacketCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PacketConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PacketConfig {
        &self.config
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = HeaderError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        let datagram = src.split().freeze();
        decode_packet(datagram, &self.config).map(Some)
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = HeaderError;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_packet(&item.header, &item.payload, dst, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use futures_util::StreamExt;
    use tokio_util::codec::FramedRead;

    use super::*;
    use crate::header::MessageHeader;

    #[test]
    fn encode_then_decode() {
        let mut codec = PacketCodec::new();
        let packet = Packet::new(
            MessageHeader::new(5)
                .with_source_node_id(1)
                .with_destination_node_id(2),
            Bytes::from_static(b"payload"),
        );

        let mut buf = BytesMut::new();
        codec.encode(packet.clone(), &mut buf).unwrap();
        assert_eq!(buf.len(), packet.wire_size());

        let decoded = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded, packet);
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        let mut codec = PacketCodec::new();
        let mut buf = BytesMut::new();
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn oversize_payload_rejected() {
        let mut codec = PacketCodec::with_config(PacketConfig {
            max_payload_size: 2,
        });
        let mut buf = BytesMut::new();
        let err = codec
            .encode(Packet::new(MessageHeader::new(1), &b"abc"[..]), &mut buf)
            .unwrap_err();
        assert!(matches!(err, HeaderError::PayloadTooLarge { .. }));
        assert_eq!(codec.config().max_payload_size, 2);
    }

    #[tokio::test]
    async fn framed_read_yields_packet() {
        let wire: &[u8] = &[0x00, 0x11, 0x09, 0x00, 0x00, 0x00, 1, 0, 0, 0, 0, 0, 0, 0, b'h', b'i'];
        let mut framed = FramedRead::new(wire, PacketCodec::new());

        let packet = framed.next().await.unwrap().unwrap();
        assert_eq!(packet.header.message_id, 9);
        assert_eq!(packet.header.destination_node_id, Some(1));
        assert_eq!(packet.payload.as_ref(), b"hi");
        assert!(framed.next().await.is_none());
    }
}
