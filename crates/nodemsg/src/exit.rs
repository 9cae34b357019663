use std::fmt;

use nodemsg_header::HeaderError;

// Process exit codes. Codec rejections are DATA_INVALID, bad arguments USAGE.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn header_error(context: &str, err: HeaderError) -> CliError {
    match err {
        HeaderError::Truncated { .. }
        | HeaderError::VersionMismatch { .. }
        | HeaderError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        HeaderError::Io(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn hex_error(arg: &str, err: hex::FromHexError) -> CliError {
    CliError::new(USAGE, format!("{arg} is not valid hex: {err}"))
}
