//! Node-addressed message header codec.
//!
//! Every message on the wire starts with a compact header: a version/flags
//! word, a 32-bit message id and up to two optional 64-bit node ids. This
//! crate re-exports the codec and ships a small inspection CLI behind the
//! `cli` feature.
//!
//! # Crate Structure
//!
//! - [`header`] — Header codec, packet helpers, and the tokio-util codec (behind `async` feature)

/// Re-export header codec types.
pub mod header {
    pub use nodemsg_header::*;
}

pub use nodemsg_header::{HeaderError, MessageHeader, HEADER_VERSION};
