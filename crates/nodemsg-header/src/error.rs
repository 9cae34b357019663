/// Coarse classification of a [`HeaderError`].
///
/// Callers that only need to decide between "drop the datagram" and
/// "reject the peer" match on this rather than on the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderErrorKind {
    /// Buffer too short for the claimed fields, or destination too small.
    InvalidArgument,
    /// The header version nibble is not the supported version.
    VersionMismatch,
    /// I/O error surfaced through the codec traits.
    Io,
}

/// Errors that can occur during header encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// The buffer ends before a field the header word says is present.
    #[error("truncated header: {field} needs {need} bytes, {have} remaining")]
    Truncated {
        field: &'static str,
        need: usize,
        have: usize,
    },

    /// The destination buffer cannot hold the encoded header.
    #[error("buffer too small for header ({capacity} bytes, need {need})")]
    BufferTooSmall { need: usize, capacity: usize },

    /// The header carries a version other than the supported one.
    #[error("header version mismatch (expected {expected}, found {found})")]
    VersionMismatch { expected: u8, found: u8 },

    /// The packet payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing packets.
    #[error("packet I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeaderError {
    pub fn kind(&self) -> HeaderErrorKind {
        match self {
            HeaderError::Truncated { .. }
            | HeaderError::BufferTooSmall { .. }
            | HeaderError::PayloadTooLarge { .. } => HeaderErrorKind::InvalidArgument,
            HeaderError::VersionMismatch { .. } => HeaderErrorKind::VersionMismatch,
            HeaderError::Io(_) => HeaderErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;
