use std::fmt;
use std::io;

use machinereq_schema::RequestError;

// Exit code constants aligned with sysexits-style semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
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
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn request_error(context: &str, err: RequestError) -> CliError {
    let code = match err {
        RequestError::InvalidJson(_)
        | RequestError::PayloadTooLarge { .. }
        | RequestError::NotAnObject(_)
        | RequestError::Invalid(_)
        | RequestError::SchemaMismatch { .. } => DATA_INVALID,
        RequestError::CompileFailed(_) => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}
