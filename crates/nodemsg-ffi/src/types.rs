use nodemsg_header::MessageHeader;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NmResult {
    Ok = 0,
    InvalidArgument = 1,
    VersionMismatch = 2,
    Internal = 99,
}

#[allow(dead_code)]
pub const NM_OK: NmResult = NmResult::Ok;
#[allow(dead_code)]
pub const NM_ERR_INVALID_ARGUMENT: NmResult = NmResult::InvalidArgument;
#[allow(dead_code)]
pub const NM_ERR_VERSION_MISMATCH: NmResult = NmResult::VersionMismatch;
#[allow(dead_code)]
pub const NM_ERR_INTERNAL: NmResult = NmResult::Internal;

/// C view of a message header. Presence flags are 0 or 1; a node id is
/// ignored on encode when its flag is 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NmHeader {
    pub message_id: u32,
    pub has_source_node_id: u8,
    pub source_node_id: u64,
    pub has_destination_node_id: u8,
    pub destination_node_id: u64,
}

impl From<&NmHeader> for MessageHeader {
    fn from(value: &NmHeader) -> Self {
        MessageHeader {
            message_id: value.message_id,
            source_node_id: (value.has_source_node_id != 0).then_some(value.source_node_id),
            destination_node_id: (value.has_destination_node_id != 0)
                .then_some(value.destination_node_id),
        }
    }
}

impl From<&MessageHeader> for NmHeader {
    fn from(value: &MessageHeader) -> Self {
        NmHeader {
            message_id: value.message_id,
            has_source_node_id: value.source_node_id.is_some() as u8,
            source_node_id: value.source_node_id.unwrap_or(0),
            has_destination_node_id: value.destination_node_id.is_some() as u8,
            destination_node_id: value.destination_node_id.unwrap_or(0),
        }
    }
}
