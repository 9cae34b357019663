//! Wire codec for the header that prefixes every node-addressed message.
//!
//! Every message starts with:
//! - A 2-byte little-endian word: version (4 bits), flags (4 bits), reserved (8 bits)
//! - A 4-byte little-endian message id
//! - An optional 8-byte source node id
//! - An optional 8-byte destination node id
//!
//! Truncated input is rejected, never read past.

#[cfg(feature = "async")]
pub mod codec;
pub mod error;
pub mod header;
pub mod packet;

#[cfg(feature = "async")]
pub use codec::PacketCodec;
pub use error::{HeaderError, HeaderErrorKind, Result};
pub use header::{
    decode, encode, encode_to, encoded_size, version_of, MessageHeader, NodeId,
    FIXED_HEADER_SIZE, FLAG_DESTINATION_NODE_ID, FLAG_SOURCE_NODE_ID, HEADER_VERSION,
    MAX_HEADER_SIZE, NODE_ID_SIZE,
};
pub use packet::{
    decode_packet, encode_packet, split_packet, Packet, PacketConfig, DEFAULT_MAX_PAYLOAD,
};
