use std::fmt;

use msgroute_registry::RegistryError;
use msgroute_types::TypeUriError;

// Process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const NOT_FOUND: i32 = 4;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;

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

pub fn type_uri_error(context: &str, err: TypeUriError) -> CliError {
    match err {
        TypeUriError::MalformedTypeUri { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        TypeUriError::InvalidQuery(_) => CliError::new(USAGE, format!("{context}: {err}")),
    }
}

pub fn registry_error(context: &str, err: RegistryError) -> CliError {
    match err {
        RegistryError::TypeUri(err) => type_uri_error(context, err),
        RegistryError::UnsupportedMessageType(_) => {
            CliError::new(NOT_FOUND, format!("{context}: {err}"))
        }
        RegistryError::Manifest(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        RegistryError::NoFallbackConfigured => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}
