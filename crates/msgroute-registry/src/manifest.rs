//! Declarative handler sets loaded from JSON.
//!
//! A manifest lets tooling rebuild a registry's capability surface without
//! linking the real handlers:
//!
//! ```json
//! {
//!   "legacy_did_sov_prefix": false,
//!   "handlers": [
//!     {
//!       "name": "issue",
//!       "messages": ["https://didcomm.org/issue-credential/1.0/offer-credential"]
//!     }
//!   ]
//! }
//! ```

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::handler::{
    HandlerResult, InboundMessage, MessageHandler, MessageShape, SupportedMessage,
};
use crate::registry::MessageHandlerRegistry;

/// Maximum manifest size accepted by [`HandlerManifest::from_path`].
pub const MAX_MANIFEST_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerManifest {
    #[serde(default)]
    pub legacy_did_sov_prefix: bool,
    pub handlers: Vec<HandlerSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerSpec {
    pub name: String,
    pub messages: Vec<String>,
}

impl HandlerManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| RegistryError::Manifest(err.to_string()))
    }

    /// Load a manifest file, refusing anything larger than [`MAX_MANIFEST_SIZE`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| RegistryError::Manifest(format!("{}: {err}", path.display())))?;

        let read_limit = u64::try_from(MAX_MANIFEST_SIZE.saturating_add(1)).unwrap_or(u64::MAX);
        let mut content = String::new();
        file.take(read_limit)
            .read_to_string(&mut content)
            .map_err(|err| RegistryError::Manifest(format!("{}: {err}", path.display())))?;
        if content.len() > MAX_MANIFEST_SIZE {
            return Err(RegistryError::Manifest(format!(
                "{}: manifest exceeds {MAX_MANIFEST_SIZE} bytes",
                path.display()
            )));
        }

        Self::from_json(&content)
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            accept_legacy_did_sov_prefix: self.legacy_did_sov_prefix,
        }
    }

    /// Build a registry holding one [`ManifestHandler`] per entry, in order.
    pub fn build_registry(&self) -> Result<MessageHandlerRegistry> {
        let mut registry = MessageHandlerRegistry::with_config(self.registry_config());
        for spec in &self.handlers {
            registry.register_message_handler(Arc::new(ManifestHandler::from_spec(spec)?));
        }
        Ok(registry)
    }
}

/// Handler declared in a manifest. Each message type gets a shape named
/// `<handler>/<message name>`; handling is a no-op.
#[derive(Debug, Clone)]
pub struct ManifestHandler {
    name: String,
    messages: Vec<SupportedMessage>,
}

impl ManifestHandler {
    pub fn from_spec(spec: &HandlerSpec) -> Result<Self> {
        if spec.name.trim().is_empty() {
            return Err(RegistryError::Manifest(
                "handler name must not be empty".to_string(),
            ));
        }

        let messages = spec
            .messages
            .iter()
            .map(|raw| -> Result<SupportedMessage> {
                let message_type = msgroute_types::parse_message_type(raw)?;
                let shape = MessageShape::named(format!(
                    "{}/{}",
                    spec.name,
                    message_type.message_name()
                ));
                Ok(SupportedMessage::new(shape, message_type))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: spec.name.clone(),
            messages,
        })
    }
}

impl MessageHandler for ManifestHandler {
    fn supported_messages(&self) -> &[SupportedMessage] {
        &self.messages
    }

    fn handle(&self, message: &InboundMessage) -> HandlerResult {
        trace!(
            handler = %self.name,
            message_type = %message.message_type,
            "manifest handler ignoring message"
        );
        Ok(None)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
