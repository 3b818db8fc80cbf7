use msgroute_types::TypeUriError;

/// Errors raised by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The incoming type string could not be parsed.
    #[error(transparent)]
    TypeUri(#[from] TypeUriError),

    /// No registered handler accepts the message type.
    #[error("unsupported message type: {0}")]
    UnsupportedMessageType(String),

    /// No fallback handler has been set.
    #[error("no fallback message handler configured")]
    NoFallbackConfigured,

    /// A handler manifest could not be loaded.
    #[error("failed to load handler manifest: {0}")]
    Manifest(String),
}

/// Errors returned by handler and middleware execution.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The handler refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),

    /// The message body did not match the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
