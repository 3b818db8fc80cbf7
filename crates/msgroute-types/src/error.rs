/// Errors that can occur while parsing type URIs or discovery queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeUriError {
    /// The input does not follow `<doc>/<protocol>/<major>.<minor>[/<message>]`.
    #[error("malformed type URI '{input}': {reason}")]
    MalformedTypeUri { input: String, reason: String },

    /// A discovery query pattern is not usable.
    #[error("invalid protocol query: {0}")]
    InvalidQuery(String),
}

impl TypeUriError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTypeUri {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TypeUriError>;
