use std::fmt;
use std::io;

use miroframe::api::FetchError;
use miroframe::{ConfigError, WalkError};

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
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

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::BrokenPipe => FAILURE,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn config_error(err: ConfigError) -> CliError {
    CliError::new(USAGE, err.to_string())
}

pub fn fetch_error(context: &str, err: FetchError) -> CliError {
    let code = match &err {
        FetchError::InvalidBaseUrl { .. } => USAGE,
        FetchError::ClientSetup(_) => INTERNAL,
        FetchError::Http { status: 401 | 403, .. } => PERMISSION_DENIED,
        FetchError::Http { .. } => FAILURE,
        FetchError::MalformedResponse { .. } => DATA_INVALID,
        FetchError::Transport { .. } if err.is_timeout() => TIMEOUT,
        FetchError::Transport { .. } => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn walk_error(err: WalkError) -> CliError {
    match err {
        WalkError::Fetch(err) => fetch_error("fetch failed", err),
        WalkError::Output(err) => io_error("failed writing output", err),
    }
}
