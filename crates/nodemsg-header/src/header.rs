use bytes::{Buf, BufMut};
use tracing::{debug, trace};

use crate::error::{HeaderError, Result};

/// The only header version this codec accepts or emits.
pub const HEADER_VERSION: u8 = 1;

/// Header word (2) + message id (4) = 6 bytes.
pub const FIXED_HEADER_SIZE: usize = 6;

/// Size of each optional node id on the wire.
pub const NODE_ID_SIZE: usize = 8;

/// Largest possible encoded header: both node ids present.
pub const MAX_HEADER_SIZE: usize = FIXED_HEADER_SIZE + 2 * NODE_ID_SIZE;

/// Header word bit: destination node id follows.
pub const FLAG_DESTINATION_NODE_ID: u16 = 0x0100;

/// Header word bit: source node id follows.
pub const FLAG_SOURCE_NODE_ID: u16 = 0x0200;

const VERSION_MASK: u16 = 0xF000;
const VERSION_SHIFT: u32 = 12;

/// Opaque 64-bit endpoint identifier.
pub type NodeId = u64;

/// The prefix carried in front of every message payload.
///
/// The version is not stored here; it is fixed to [`HEADER_VERSION`] on
/// encode and checked on decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MessageHeader {
    /// Message identifier. Sequencing policy belongs to the sender.
    pub message_id: u32,
    /// Sending node, if the header names one.
    pub source_node_id: Option<NodeId>,
    /// Receiving node, if the header names one.
    pub destination_node_id: Option<NodeId>,
}

impl MessageHeader {
    /// Create a header with no node ids.
    pub fn new(message_id: u32) -> Self {
        Self {
            message_id,
            ..Self::default()
        }
    }

    pub fn with_message_id(mut self, message_id: u32) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn with_source_node_id(mut self, node_id: NodeId) -> Self {
        self.source_node_id = Some(node_id);
        self
    }

    pub fn with_destination_node_id(mut self, node_id: NodeId) -> Self {
        self.destination_node_id = Some(node_id);
        self
    }

    pub fn without_source_node_id(mut self) -> Self {
        self.source_node_id = None;
        self
    }

    pub fn without_destination_node_id(mut self) -> Self {
        self.destination_node_id = None;
        self
    }

    /// The number of bytes [`encode`](Self::encode) will write.
    pub fn encoded_size(&self) -> usize {
        encoded_size(self)
    }

    /// Decode a header from the front of `src`. See [`decode`].
    pub fn decode(src: &[u8]) -> Result<Self> {
        decode(src)
    }

    /// Encode this header into `dst`. See [`encode`].
    pub fn encode(&self, dst: &mut [u8]) -> Result<usize> {
        encode(self, dst)
    }

    /// The 16-bit header word for this header.
    pub fn header_word(&self) -> u16 {
        let mut word = (HEADER_VERSION as u16) << VERSION_SHIFT;
        if self.source_node_id.is_some() {
            word |= FLAG_SOURCE_NODE_ID;
        }
        if self.destination_node_id.is_some() {
            word |= FLAG_DESTINATION_NODE_ID;
        }
        word
    }
}

/// Extract the version nibble from a header word.
pub fn version_of(word: u16) -> u8 {
    ((word & VERSION_MASK) >> VERSION_SHIFT) as u8
}

/// Encoded size of `header`: 6, 14 or 22 bytes.
pub fn encoded_size(header: &MessageHeader) -> usize {
    let mut size = FIXED_HEADER_SIZE;
    if header.source_node_id.is_some() {
        size += NODE_ID_SIZE;
    }
    if header.destination_node_id.is_some() {
        size += NODE_ID_SIZE;
    }
    size
}

/// Decode a header from the front of `src`.
///
/// Wire format (little endian):
/// ```text
/// ┌────────────────────────────────┬────────────┬──────────────┬──────────────┐
/// │ Word (2B LE)                   │ Message ID │ Source ID    │ Dest ID      │
/// │ ver:4 │ flags:4 │ reserved:8   │ (4B LE)    │ (8B LE, opt) │ (8B LE, opt) │
/// └────────────────────────────────┴────────────┴──────────────┴──────────────┘
/// ```
///
/// The version is checked before anything else is interpreted. Bytes past
/// the header are left for the caller as payload.
pub fn decode(src: &[u8]) -> Result<MessageHeader> {
    if src.len() < FIXED_HEADER_SIZE {
        debug!(len = src.len(), "header shorter than fixed prefix");
        return Err(HeaderError::Truncated {
            field: "fixed header",
            need: FIXED_HEADER_SIZE,
            have: src.len(),
        });
    }

    let mut buf = src;
    let word = buf.get_u16_le();

    let version = version_of(word);
    if version != HEADER_VERSION {
        debug!(version, "rejecting header with unsupported version");
        return Err(HeaderError::VersionMismatch {
            expected: HEADER_VERSION,
            found: version,
        });
    }

    let message_id = buf.get_u32_le();

    let source_node_id = if word & FLAG_SOURCE_NODE_ID != 0 {
        Some(read_node_id(&mut buf, "source node id")?)
    } else {
        None
    };

    let destination_node_id = if word & FLAG_DESTINATION_NODE_ID != 0 {
        Some(read_node_id(&mut buf, "destination node id")?)
    } else {
        None
    };

    let header = MessageHeader {
        message_id,
        source_node_id,
        destination_node_id,
    };
    trace!(
        message_id,
        source = source_node_id.is_some(),
        destination = destination_node_id.is_some(),
        "decoded header"
    );
    Ok(header)
}

fn read_node_id(buf: &mut &[u8], field: &'static str) -> Result<NodeId> {
    if buf.remaining() < NODE_ID_SIZE {
        debug!(field, remaining = buf.remaining(), "header truncated in node id");
        return Err(HeaderError::Truncated {
            field,
            need: NODE_ID_SIZE,
            have: buf.remaining(),
        });
    }
    Ok(buf.get_u64_le())
}

/// Encode `header` into the front of `dst`, returning the bytes written.
///
/// Nothing is written unless the whole header fits.
pub fn encode(header: &MessageHeader, dst: &mut [u8]) -> Result<usize> {
    let required = encoded_size(header);
    if dst.len() < required {
        debug!(
            capacity = dst.len(),
            need = required,
            "destination too small for header"
        );
        return Err(HeaderError::BufferTooSmall {
            need: required,
            capacity: dst.len(),
        });
    }

    let mut out = &mut dst[..required];
    put_header(header, &mut out);
    debug_assert!(out.is_empty());

    trace!(message_id = header.message_id, size = required, "encoded header");
    Ok(required)
}

/// Append `header` to a growable buffer, returning the bytes written.
pub fn encode_to<B: BufMut>(header: &MessageHeader, dst: &mut B) -> Result<usize> {
    let required = encoded_size(header);
    if dst.remaining_mut() < required {
        debug!(
            capacity = dst.remaining_mut(),
            need = required,
            "destination too small for header"
        );
        return Err(HeaderError::BufferTooSmall {
            need: required,
            capacity: dst.remaining_mut(),
        });
    }
    put_header(header, dst);
    Ok(required)
}

fn put_header<B: BufMut>(header: &MessageHeader, dst: &mut B) {
    dst.put_u16_le(header.header_word());
    dst.put_u32_le(header.message_id);
    if let Some(source) = header.source_node_id {
        dst.put_u64_le(source);
    }
    if let Some(destination) = header.destination_node_id {
        dst.put_u64_le(destination);
    }
}
